// Entity Models
//
// A bank record is identified by its bank code and never changes after the
// data file is loaded.

pub mod bank;

pub use bank::{AlgorithmParams, BankRecord, BankRegistry};
