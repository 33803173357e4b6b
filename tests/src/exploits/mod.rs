//! # Exploit Simulations
//!
//! Each module models an attacker with one capability (a malicious
//! submodule, a watcher key, an outsider account) and asserts the router's
//! guarantees survive it.

pub mod governance;
pub mod reentrancy;
