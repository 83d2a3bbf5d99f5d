pub mod datetime;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
