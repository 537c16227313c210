use anyhow::Result;

fn main() -> Result<()> {
    mermaid_refiner_cli::main_entry()
}
