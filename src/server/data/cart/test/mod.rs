mod lines;

use super::*;
use test_utils::{builder::TestBuilder, factory};
