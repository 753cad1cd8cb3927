//! Drive an h5sh shell from Rust over a store built in code.
//!
//! Run:  cargo run -p h5sh --example embed

use h5sh::{H5shResult, Shell, ShellBuilder, Theme};
use h5sh_core::MemoryStore;
use h5sh_sdk::{AttributeInfo, DatasetInfo, ElementType, Shape, StoreResult};
use std::io::Write;
use std::sync::Arc;

fn build_store() -> StoreResult<MemoryStore> {
    let mut store = MemoryStore::new();
    store.set_attribute("/", "version", AttributeInfo::scalar(ElementType::parse("int64"), "2"))?;
    store.add_group("/survey")?;
    store.add_dataset(
        "/survey/depths",
        DatasetInfo {
            shape: Shape::new(vec![512, 512]),
            element_type: ElementType::parse("float32"),
        },
    )?;
    store.set_attribute(
        "/survey",
        "origin",
        AttributeInfo::array(Shape::new(vec![2]), ElementType::parse("float64")),
    )?;
    store.add_datatype("/survey/sample_t")?;
    Ok(store)
}

/// Prints how many entries the current group holds.
fn count(shell: &mut Shell, _arg: &str, out: &mut dyn Write) -> H5shResult<()> {
    let listing = shell.execute_capture("ls")?;
    writeln!(out, "{} entries in {}", listing.lines().count(), shell.cwd())?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut shell = ShellBuilder::new(Arc::new(build_store()?))
        .file_name("survey.h5")
        .theme(Theme::new(true))
        .command("count", count)
        .build();

    for line in ["ls", "cd survey", "ls", "count", "ls d*", "cd depths"] {
        println!("{}{line}", shell.prompt("{prompt}{file}:{path}{cwd}{prompt}> {reset}"));
        match shell.execute_capture(line) {
            Ok(output) => print!("{output}"),
            Err(e) => println!("{}", shell.error_message(&e)),
        }
    }
    Ok(())
}
