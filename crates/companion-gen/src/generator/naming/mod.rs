pub mod identifiers;
pub mod windows;

#[cfg(test)]
mod tests;
