use crate::cli::{UserAddArgs, UserKey, UserShowArgs};
use crate::output;
use lightbnb_db::{GenericClient, Lenient, add_user};

pub async fn show<C: GenericClient>(client: &C, args: &UserShowArgs) -> anyhow::Result<()> {
    let lenient = Lenient::new(client);
    let user = match &args.key {
        UserKey::Email(email) => lenient.get_user_with_email(email).await,
        UserKey::Id(id) => lenient.get_user_with_id(*id).await,
    };

    if args.json {
        return output::print_json(&user);
    }
    match user {
        Some(user) => println!("{}", output::user_table(&user)),
        None => println!("no such user"),
    }
    Ok(())
}

pub async fn add<C: GenericClient>(client: &C, args: &UserAddArgs) -> anyhow::Result<()> {
    let user = add_user(client, &args.user).await?;
    println!("added user {} <{}> with id {}", user.name, user.email, user.id);
    Ok(())
}
