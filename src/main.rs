use anyhow::Result;

fn main() -> Result<()> {
    vault_tasks::cli::run()
}
