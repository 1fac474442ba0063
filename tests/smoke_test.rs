//! Live smoke test against the public countries API.
//!
//! Fetches the real dataset and drives the countries view model through a
//! typical browsing session.
//!
//! Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use wordbook_sdk::listing::{FilterUpdate, Filterable};
use wordbook_sdk::WordbookSdk;

fn section(name: &str) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("  {}", name);
    eprintln!("{}", "=".repeat(60));
}

#[test]
#[ignore]
fn smoke_countries_dashboard() {
    let sdk = WordbookSdk::builder().in_memory().build().unwrap();
    eprintln!("{}", sdk);

    section("Fetch");
    let countries = sdk.countries().fetch_all().unwrap();
    eprintln!("  fetched {} countries", countries.len());
    assert!(countries.len() > 200);

    section("Browse");
    let mut list = sdk.country_list();
    assert!(list.load_collection(&sdk.countries()));
    assert!(list.error().is_none());

    let (first_page, info) = list.page();
    assert_eq!(first_page.len(), 15);
    eprintln!("  {}", info.summary());

    let query = list.set_filter(FilterUpdate::Flag(true));
    assert_eq!(query, "independent=true");
    assert!(list.filtered().iter().all(|c| c.flag()));

    let query = list.set_filter(FilterUpdate::Category("eur".into()));
    assert_eq!(query, "independent=true&currency=eur");
    let euro = list.filtered_len();
    eprintln!("  independent euro countries: {}", euro);
    assert!(euro > 10);

    for country in list.page().0 {
        eprintln!(
            "  {} {:<30} {:<20} {}",
            country.cca3,
            country.name.common,
            country.primary_capital(),
            country.primary_currency()
        );
    }

    section("URL state");
    let last = list.total_pages();
    let query = list.set_page(last + 10);
    eprintln!("  clamped query: {}", query);
    assert_eq!(list.current_page(), last);

    sdk.close();
}
