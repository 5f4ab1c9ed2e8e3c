#![allow(missing_docs)]

mod write;
