use crate::cli::PropertyAddArgs;
use crate::output;
use lightbnb_db::{GenericClient, add_property};

pub async fn add<C: GenericClient>(client: &C, args: &PropertyAddArgs) -> anyhow::Result<()> {
    let property = add_property(client, &args.property).await?;
    output::print_json(&property)
}
