//! Stock aggregation policy.

/// Controls which sizes count toward a product's aggregated stock.
///
/// The variant-level active flag always applies; this policy only decides
/// whether the size-level flag is consulted as well. Call sites choose
/// explicitly instead of the aggregator hard-coding one behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockPolicy {
    /// Sum stock across every size of active variants.
    #[default]
    AllSizes,
    /// Additionally require the size-level active flag.
    ActiveSizesOnly,
}
