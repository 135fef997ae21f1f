#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// runnable demonstrations of formula parsing and both root-finding engines
/// ________________________________________________________________________________________________________________________________
pub mod root_finding_examples;
