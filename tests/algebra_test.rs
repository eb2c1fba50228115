use std::collections::BTreeMap;
use vibealgebra::{
    Attribute, Expression, Header, HeaderError, Predicate, QueryError, Relation, RelationError,
    SortOrder, StringExpression, Tuple, Value, ValueType,
};

fn students() -> Relation {
    Relation::new(
        vec![
            Attribute::required("id", ValueType::Integer),
            Attribute::required("name", ValueType::String),
            Attribute::required("age", ValueType::Integer),
            Attribute::optional("hobby", ValueType::String),
        ],
        vec![
            vec![
                Value::Integer(1),
                Value::string("Alice"),
                Value::Integer(21),
                Value::Null,
            ],
            vec![
                Value::Integer(2),
                Value::string("Bob"),
                Value::Integer(24),
                Value::string("cycling"),
            ],
            vec![
                Value::Integer(3),
                Value::string("Carol"),
                Value::Integer(19),
                Value::Null,
            ],
        ],
    )
}

fn enrollments() -> Relation {
    Relation::new(
        vec![
            Attribute::required("id", ValueType::Integer),
            Attribute::required("course", ValueType::String),
        ],
        vec![
            vec![Value::Integer(1), Value::string("math")],
            vec![Value::Integer(1), Value::string("art")],
            vec![Value::Integer(2), Value::string("math")],
            vec![Value::Integer(3), Value::string("art")],
        ],
    )
}

fn rows(relation: &Relation, names: &[&str]) -> Vec<Vec<Value>> {
    relation
        .tuples()
        .unwrap()
        .iter()
        .map(|t| {
            names
                .iter()
                .map(|n| t.get(n).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect()
}

#[test]
fn test_header_errors() {
    assert_eq!(Header::new(vec![]), Err(HeaderError::Empty));
    assert_eq!(
        Header::new(vec![
            Attribute::required("a", ValueType::Integer),
            Attribute::required("b", ValueType::Integer),
            Attribute::required("a", ValueType::String),
            Attribute::required("b", ValueType::Integer),
            Attribute::required("c", ValueType::Integer),
        ]),
        Err(HeaderError::Duplicates(vec![
            "a".to_string(),
            "b".to_string()
        ]))
    );
}

#[test]
fn test_projection_keeps_order() {
    let result = students().project(["id", "name"]);
    assert_eq!(
        rows(&result, &["id", "name"]),
        vec![
            vec![Value::Integer(1), Value::string("Alice")],
            vec![Value::Integer(2), Value::string("Bob")],
            vec![Value::Integer(3), Value::string("Carol")],
        ]
    );
}

#[test]
fn test_selection_keeps_order() {
    let result = students().select(Predicate::gt(
        Expression::attribute("age"),
        Value::Integer(20),
    ));
    assert_eq!(
        rows(&result, &["id"]),
        vec![vec![Value::Integer(1)], vec![Value::Integer(2)]]
    );
}

#[test]
fn test_rename_replaces_in_place() -> anyhow::Result<()> {
    let result = students().rename("identifier", "id");
    let header = result.header()?;
    assert_eq!(
        header.attributes()[0],
        Attribute::required("identifier", ValueType::Integer)
    );
    assert_eq!(header.len(), 4);

    for (tuple, id) in result.tuples()?.iter().zip(1..) {
        assert!(!tuple.contains("id"));
        assert_eq!(tuple.get("identifier"), Some(&Value::Integer(id)));
    }
    Ok(())
}

#[test]
fn test_order_by_is_stable() {
    let result = enrollments().order_by([("course", SortOrder::Ascending)]);
    assert_eq!(
        rows(&result, &["id", "course"]),
        vec![
            vec![Value::Integer(1), Value::string("art")],
            vec![Value::Integer(3), Value::string("art")],
            vec![Value::Integer(1), Value::string("math")],
            vec![Value::Integer(2), Value::string("math")],
        ]
    );
}

#[test]
fn test_set_operations_need_identical_headers() {
    let ids = students().project(["id"]);
    let names = students().project(["name"]);
    for result in [ids.union(&names), ids.intersect(&names), ids.subtract(&names)] {
        assert!(matches!(
            result.header(),
            Err(RelationError::Query(QueryError::NotUnionCompatible(..)))
        ));
    }
}

#[test]
fn test_set_operations() -> anyhow::Result<()> {
    let students_ids = students().project(["id"]);
    let enrolled_ids = enrollments().project(["id"]);
    let older = students()
        .select(Predicate::ge(Expression::attribute("age"), Value::Integer(21)))
        .project(["id"]);

    assert_eq!(students_ids.union(&enrolled_ids).tuples()?.len(), 3);
    assert_eq!(students_ids.intersect(&older).tuples()?.len(), 2);
    assert_eq!(
        rows(&students_ids.subtract(&older), &["id"]),
        vec![vec![Value::Integer(3)]]
    );
    Ok(())
}

#[test]
fn test_product_needs_disjoint_names() -> anyhow::Result<()> {
    assert!(matches!(
        students().product(&enrollments()).header(),
        Err(RelationError::Query(QueryError::NotDisjoint(..)))
    ));

    let product = students().product(&enrollments().rename("student", "id"));
    assert_eq!(product.tuples()?.len(), 12);
    assert_eq!(
        product.header()?.names(),
        vec!["id", "name", "age", "hobby", "student", "course"]
    );
    Ok(())
}

#[test]
fn test_natural_join_without_shared_names_is_product() {
    let left = students().project(["name"]);
    let right = enrollments().project(["course"]);
    assert_eq!(left.natural_join(&right), left.product(&right));
}

#[test]
fn test_theta_join_equals_selection_over_product() {
    let left = students().project(["id", "name"]);
    let right = enrollments().rename("student", "id");
    let predicate = Predicate::eq(Expression::attribute("id"), Expression::attribute("student"));
    assert_eq!(
        left.theta_join(&right, predicate.clone()),
        left.product(&right).select(predicate)
    );
}

#[test]
fn test_semi_joins() {
    let math = enrollments().select(Predicate::eq(
        Expression::attribute("course"),
        Value::string("math"),
    ));

    assert_eq!(
        rows(&students().left_semi_join(&math), &["name"]),
        vec![vec![Value::string("Alice")], vec![Value::string("Bob")]]
    );
    assert_eq!(
        rows(&students().anti_semi_join(&math), &["name"]),
        vec![vec![Value::string("Carol")]]
    );
    assert_eq!(students().right_semi_join(&math), math);
}

#[test]
fn test_division() {
    let courses = Relation::new(
        vec![Attribute::required("course", ValueType::String)],
        vec![vec![Value::string("math")], vec![Value::string("art")]],
    );
    let quotient = enrollments().divide(&courses);
    assert_eq!(rows(&quotient, &["id"]), vec![vec![Value::Integer(1)]]);

    // Every quotient tuple pairs with every divisor tuple in the dividend
    let dividend = enrollments().tuples().unwrap();
    for q in &quotient.tuples().unwrap() {
        for c in &courses.tuples().unwrap() {
            assert!(dividend.contains(&q.merge(c)));
        }
    }
}

#[test]
fn test_keyed_rows() {
    let relation = Relation::from_maps(
        vec![
            Attribute::required("id", ValueType::Integer),
            Attribute::optional("hobby", ValueType::String),
        ],
        vec![
            BTreeMap::from([("id".to_string(), Value::Integer(7))]),
            BTreeMap::from([("id".to_string(), Value::string("seven"))]),
        ],
    );
    let tuples = relation.tuples().unwrap();
    assert_eq!(tuples.len(), 1);
    assert!(tuples.contains(&Tuple::new([
        ("id", Value::Integer(7)),
        ("hobby", Value::Null)
    ])));
}

#[test]
fn test_string_expressions_in_selection() {
    let result = students().select(Predicate::eq(
        StringExpression::lowercased(StringExpression::attribute("name")),
        Value::string("bob"),
    ));
    assert_eq!(rows(&result, &["id"]), vec![vec![Value::Integer(2)]]);
}

#[test]
fn test_errors_propagate_through_composition() {
    let broken = students().select(Predicate::gt(
        Expression::attribute("salary"),
        Value::Integer(0),
    ));
    let derived = broken.project(["id"]).natural_join(&enrollments());
    assert_eq!(
        derived.header(),
        Err(RelationError::Query(QueryError::UnknownAttributes(vec![
            "salary".to_string()
        ])))
    );

    // Left failure wins when both sides fail
    let other = students().project(["email"]);
    assert_eq!(broken.union(&other).header(), broken.header());
}
