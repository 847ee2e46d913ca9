use crate::server::data::stock::StockRepository;
use crate::server::model::stock::StockPolicy;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod sum_available;
mod write;
