// tests/core/mod.rs

#[cfg(test)]
mod cipher;
#[cfg(test)]
mod grade;
#[cfg(test)]
mod stats;
#[cfg(test)]
mod store;
