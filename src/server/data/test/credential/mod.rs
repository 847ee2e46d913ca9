use crate::server::data::credential::CredentialRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod lock;
mod store;
