//! Integration test suite for the macroveil workspace.

#[cfg(test)]
mod aliasing;
#[cfg(test)]
mod roundtrip;
