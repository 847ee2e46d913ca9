mod credential;
mod product;
mod stock;
mod user;
