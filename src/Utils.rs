#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// shared terminal logger initialization for the numerical engines
/// ________________________________________________________________________________________________________________________________
pub mod logging;
