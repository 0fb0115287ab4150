use crate::cli::ReservationsArgs;
use crate::output;
use lightbnb_db::{GenericClient, Lenient};

pub async fn run<C: GenericClient>(client: &C, args: &ReservationsArgs) -> anyhow::Result<()> {
    let rows = Lenient::new(client)
        .get_all_reservations(args.guest_id, args.limit)
        .await;

    if args.json {
        return output::print_json(&rows);
    }
    if rows.is_empty() {
        println!("no reservations for guest {}", args.guest_id);
    } else {
        println!("{}", output::reservations_table(&rows));
    }
    Ok(())
}
