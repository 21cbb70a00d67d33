#![allow(unused_imports)]

pub(crate) mod fixture;

pub use fixture::*;
