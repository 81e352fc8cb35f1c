#![allow(dead_code)]

pub mod fixtures;
pub mod server;

pub use server::StubServer;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
