#![deny(unused_must_use)]

mod ledger;
mod properties;
