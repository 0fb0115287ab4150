use lightbnb_db::pool::Pool;

pub async fn run(pool: &Pool) -> anyhow::Result<()> {
    let report = lightbnb_db::migrate::run_pool(pool).await?;
    let applied = report.applied_migrations();
    if applied.is_empty() {
        println!("schema is up to date");
    }
    for m in applied {
        println!("applied V{}__{}", m.version(), m.name());
    }
    Ok(())
}
