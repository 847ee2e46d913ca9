pub use super::cart::Entity as Cart;
pub use super::cart_item::Entity as CartItem;
pub use super::credential_lock::Entity as CredentialLock;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::payment::Entity as Payment;
pub use super::product::Entity as Product;
pub use super::product_image::Entity as ProductImage;
pub use super::shipping_credential::Entity as ShippingCredential;
pub use super::user::Entity as User;
pub use super::variant::Entity as Variant;
pub use super::variant_image::Entity as VariantImage;
pub use super::variant_size::Entity as VariantSize;
