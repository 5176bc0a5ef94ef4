//! create-content-engine — scaffold a project from a content-engine template.

fn main() -> anyhow::Result<()> {
    cehelper_cli::main()
}
