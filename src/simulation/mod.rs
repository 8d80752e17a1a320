pub mod random_ledger;
