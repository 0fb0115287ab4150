use crate::cli::SearchArgs;
use crate::output;
use lightbnb_db::{DEFAULT_LIMIT, GenericClient, Lenient, search};

/// Print the statement and bind values that `run` would execute.
pub fn explain(args: &SearchArgs) -> anyhow::Result<()> {
    let plan = search::build(&args.filter, args.limit.unwrap_or(DEFAULT_LIMIT));
    plan.validate()?;
    println!("{plan}");
    Ok(())
}

pub async fn run<C: GenericClient>(client: &C, args: &SearchArgs) -> anyhow::Result<()> {
    let hits = Lenient::new(client)
        .search_properties(&args.filter, args.limit)
        .await;

    if args.json {
        return output::print_json(&hits);
    }
    if hits.is_empty() {
        println!("no properties found");
    } else {
        println!("{}", output::listings_table(&hits));
    }
    Ok(())
}
