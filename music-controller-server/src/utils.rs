#[cfg(test)]
pub mod fake_code_source;
