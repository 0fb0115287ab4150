use super::*;
use rust_decimal::Decimal;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Every combination of the five optional fields.
fn all_filters() -> Vec<FilterSpec> {
    (0u8..32)
        .map(|mask| FilterSpec {
            city: (mask & 1 != 0).then(|| "Vancouver".to_string()),
            owner_id: (mask & 2 != 0).then_some(7),
            min_price_per_night: (mask & 4 != 0).then_some(50),
            max_price_per_night: (mask & 8 != 0).then_some(150),
            min_rating: (mask & 16 != 0).then_some(Decimal::from(4)),
        })
        .collect()
}

fn pre_aggregation_count(filter: &FilterSpec) -> usize {
    [
        filter.city.is_some(),
        filter.owner_id.is_some(),
        filter.min_price_per_night.is_some(),
        filter.max_price_per_night.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count()
}

#[test]
fn empty_filter_has_no_where_and_binds_only_limit() {
    let plan = build(&FilterSpec::new(), 10);

    assert!(!plan.sql().contains("WHERE"), "{}", plan.sql());
    assert!(!plan.sql().contains("HAVING"), "{}", plan.sql());
    assert_eq!(plan.params(), &[BindValue::BigInt(10)]);
    assert!(plan.sql().ends_with("GROUP BY properties.id ORDER BY cost_per_night ASC LIMIT $1"));
}

#[test]
fn city_only() {
    let plan = build(&FilterSpec::new().city("Vancouver"), 5);

    assert!(plan.sql().contains("WHERE city LIKE initcap($1)"), "{}", plan.sql());
    assert!(plan.sql().contains("LIMIT $2"));
    assert_eq!(
        plan.params(),
        &[BindValue::from("Vancouver"), BindValue::BigInt(5)]
    );
}

#[test]
fn price_range_with_rating() {
    let filter = FilterSpec::new()
        .min_price_per_night(50)
        .max_price_per_night(150)
        .min_rating(4);
    let plan = build(&filter, 10);

    assert_eq!(
        plan.sql(),
        "SELECT properties.*, AVG(property_reviews.rating) AS average_rating \
         FROM properties \
         JOIN property_reviews ON properties.id = property_reviews.property_id \
         WHERE cost_per_night >= $1 AND cost_per_night <= $2 \
         GROUP BY properties.id \
         HAVING AVG(property_reviews.rating) >= $3 \
         ORDER BY cost_per_night ASC \
         LIMIT $4"
    );
    assert_eq!(
        plan.params(),
        &[
            BindValue::Int(50),
            BindValue::Int(150),
            BindValue::Numeric(Decimal::from(4)),
            BindValue::BigInt(10),
        ]
    );
}

#[test]
fn lone_max_price_opens_with_where() {
    let plan = build(&FilterSpec::new().max_price_per_night(150), 10);
    assert!(plan.sql().contains(" WHERE cost_per_night <= $1 GROUP BY"), "{}", plan.sql());
    assert_eq!(count(plan.sql(), " AND "), 0);
}

#[test]
fn owner_uses_exact_equality() {
    let plan = build(&FilterSpec::new().owner_id(3), 10);
    assert!(plan.sql().contains("WHERE owner_id = $1"), "{}", plan.sql());
    assert!(!plan.sql().contains("LIKE"));
}

#[test]
fn rating_only_uses_having_without_where() {
    let plan = build(&FilterSpec::new().min_rating(Decimal::new(35, 1)), 3);
    assert!(!plan.sql().contains("WHERE"));
    assert!(plan.sql().contains("HAVING AVG(property_reviews.rating) >= $1"));
    assert_eq!(
        plan.params(),
        &[BindValue::Numeric(Decimal::new(35, 1)), BindValue::BigInt(3)]
    );
}

#[test]
fn where_and_counts_hold_for_every_combination() {
    for filter in all_filters() {
        let plan = build(&filter, 10);
        let k = pre_aggregation_count(&filter);
        let sql = plan.sql();

        assert_eq!(count(sql, "WHERE"), usize::from(k > 0), "{sql}");
        assert_eq!(count(sql, " AND "), k.saturating_sub(1), "{sql}");
    }
}

#[test]
fn predicates_keep_fixed_order() {
    for filter in all_filters() {
        let sql = build(&filter, 10).sql().to_string();
        let positions: Vec<usize> = ["city LIKE", "owner_id =", "cost_per_night >=", "cost_per_night <="]
            .iter()
            .filter_map(|needle| sql.find(needle))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "{sql}");
    }
}

#[test]
fn having_sits_between_group_by_and_order_by() {
    for filter in all_filters() {
        let sql = build(&filter, 10).sql().to_string();
        let group_by = sql.find("GROUP BY").unwrap();
        let order_by = sql.find("ORDER BY").unwrap();
        match sql.find("HAVING") {
            Some(having) => {
                assert!(filter.min_rating.is_some(), "{sql}");
                assert!(group_by < having && having < order_by, "{sql}");
            }
            None => assert!(filter.min_rating.is_none(), "{sql}"),
        }
    }
}

#[test]
fn placeholders_are_contiguous_and_limit_is_last() {
    for filter in all_filters() {
        let limit = 42;
        let plan = build(&filter, limit);
        let expected =
            pre_aggregation_count(&filter) + usize::from(filter.min_rating.is_some()) + 1;

        assert_eq!(plan.placeholders(), (1..=expected).collect::<Vec<_>>());
        assert_eq!(plan.params().len(), expected);
        assert_eq!(plan.params().last(), Some(&BindValue::BigInt(limit)));
        assert!(plan.sql().ends_with(&format!("LIMIT ${expected}")));
        plan.validate().unwrap();
    }
}

#[test]
fn limit_is_bound_unclamped() {
    let plan = build(&FilterSpec::new(), -1);
    assert_eq!(plan.params(), &[BindValue::BigInt(-1)]);
}

#[test]
fn city_containing_wraps_wildcards() {
    let plan = build(&FilterSpec::new().city_containing("vancouver"), 10);
    assert_eq!(plan.params()[0], BindValue::from("%vancouver%"));
}

#[test]
fn build_leaves_filter_untouched() {
    let filter = FilterSpec::new().city("Paris").min_rating(3);
    let before = filter.clone();
    let _ = build(&filter, 10);
    assert_eq!(filter, before);
}

#[test]
fn plan_is_tagged() {
    assert_eq!(build(&FilterSpec::new(), 1).tag(), Some("properties.search"));
}

#[test]
fn deserializes_spec_and_legacy_keys() {
    let camel: FilterSpec = serde_json::from_str(
        r#"{"city":"Vancouver","ownerId":2,"minPricePerNight":50,"maxPricePerNight":150,"minRating":4.5}"#,
    )
    .unwrap();
    let legacy: FilterSpec = serde_json::from_str(
        r#"{"city":"Vancouver","owner_id":2,"minimum_price_per_night":50,"maximum_price_per_night":150,"minimum_rating":4.5}"#,
    )
    .unwrap();

    assert_eq!(camel, legacy);
    assert_eq!(camel.min_rating, Some(Decimal::new(45, 1)));
}

#[test]
fn rejects_unknown_keys() {
    let err = serde_json::from_str::<FilterSpec>(r#"{"city":"Vancouver","bedrooms":3}"#)
        .unwrap_err();
    assert!(err.to_string().contains("unknown field `bedrooms`"), "{err}");
}

#[test]
fn absent_keys_mean_no_constraint() {
    let filter: FilterSpec = serde_json::from_str("{}").unwrap();
    assert!(filter.is_empty());
    assert!(filter.predicates().is_empty());
}

#[test]
fn or_prefers_self() {
    let flags = FilterSpec::new().city("Paris");
    let file = FilterSpec::new().city("Lyon").owner_id(9);
    assert_eq!(flags.or(file), FilterSpec::new().city("Paris").owner_id(9));
}

#[test]
fn empty_city_from_a_blank_form_adds_no_predicate() {
    let filter: FilterSpec = serde_json::from_str(r#"{"city": ""}"#).unwrap();
    let plan = build(&filter, 10);

    assert!(!plan.sql().contains("WHERE"), "{}", plan.sql());
    assert_eq!(plan.params(), &[BindValue::BigInt(10)]);
    assert!(filter.is_empty());
}

#[test]
fn zero_values_count_as_unset() {
    let filter: FilterSpec = serde_json::from_str(
        r#"{"city": "", "owner_id": 0, "minimum_price_per_night": 0,
            "maximum_price_per_night": 0, "minimum_rating": 0}"#,
    )
    .unwrap();
    let plan = build(&filter, 10);

    assert!(!plan.sql().contains("WHERE"), "{}", plan.sql());
    assert!(!plan.sql().contains("HAVING"), "{}", plan.sql());
    assert_eq!(plan.params(), &[BindValue::BigInt(10)]);
}

#[test]
fn blank_fields_do_not_shift_placeholders() {
    let filter = FilterSpec::new().city("").owner_id(0).max_price_per_night(150);
    let plan = build(&filter, 5);

    assert!(plan.sql().contains("WHERE cost_per_night <= $1"), "{}", plan.sql());
    assert!(plan.sql().ends_with("LIMIT $2"));
    assert_eq!(plan.params(), &[BindValue::Int(150), BindValue::BigInt(5)]);
    plan.validate().unwrap();
}

#[test]
fn blank_fields_fall_through_in_or() {
    let merged = FilterSpec::new()
        .city("")
        .min_price_per_night(0)
        .or(FilterSpec::new().city("Toronto").min_price_per_night(80));

    assert_eq!(merged.city.as_deref(), Some("Toronto"));
    assert_eq!(merged.min_price_per_night, Some(80));
}
