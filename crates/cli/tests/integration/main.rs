mod build_tests;
mod common;
mod install_tests;
mod setup_tests;
