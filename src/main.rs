#![allow(non_snake_case)]
use RustedRoots::Examples::root_finding_examples::root_finding_examples;

fn main() {
    let example = 1;
    root_finding_examples(example);
}
