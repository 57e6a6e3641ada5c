pub use crate::flow::{form::*, present::*, reconcile::*, submit::*, validate::*};

pub mod form;
pub mod present;
pub mod reconcile;
pub mod submit;
pub mod validate;
