//! VibeAlgebra demo - evaluates a few canned relational algebra queries

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use vibealgebra::{
    Attribute, Expression, NumericExpression, Predicate, Relation, SortOrder, Value, ValueType,
};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Demo {
    /// Projection, selection, rename and ordering over one relation
    Students,
    /// Natural, theta and semi joins
    Joins,
    /// Relational division
    Division,
    /// Every demo in turn
    All,
}

/// VibeAlgebra - an in-memory relational algebra engine
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Demo to run
    #[arg(long, value_enum, default_value = "all")]
    demo: Demo,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let students = students();
    let enrollments = enrollments();

    if matches!(args.demo, Demo::Students | Demo::All) {
        students_demo(&students)?;
    }
    if matches!(args.demo, Demo::Joins | Demo::All) {
        joins_demo(&students, &enrollments)?;
    }
    if matches!(args.demo, Demo::Division | Demo::All) {
        division_demo(&enrollments)?;
    }

    Ok(())
}

fn students() -> Relation {
    Relation::new(
        vec![
            Attribute::required("id", ValueType::Integer),
            Attribute::required("name", ValueType::String),
            Attribute::required("age", ValueType::Integer),
            Attribute::optional("hobby", ValueType::String),
        ],
        vec![
            vec![Value::Integer(1), "Alice".into(), Value::Integer(21), Value::Null],
            vec![Value::Integer(2), "Bob".into(), Value::Integer(24), "cycling".into()],
            vec![Value::Integer(3), "Carol".into(), Value::Integer(19), Value::Null],
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
            vec![Value::Integer(1), "math".into()],
            vec![Value::Integer(1), "art".into()],
            vec![Value::Integer(2), "math".into()],
            vec![Value::Integer(3), "art".into()],
        ],
    )
}

fn courses() -> Relation {
    Relation::new(
        vec![Attribute::required("course", ValueType::String)],
        vec![vec!["math".into()], vec!["art".into()]],
    )
}

fn print_relation(title: &str, relation: &Relation) -> Result<()> {
    let resolved = relation
        .resolve()
        .with_context(|| format!("Failed to evaluate {}", title))?;

    println!("{} {}", title, resolved.header);
    for tuple in &resolved.tuples {
        println!("  {}", tuple);
    }
    println!();
    Ok(())
}

fn students_demo(students: &Relation) -> Result<()> {
    print_relation("students", students)?;
    print_relation("π(id, name)", &students.project(["id", "name"]))?;
    let adults = Predicate::gt(Expression::attribute("age"), Value::Integer(20));
    print_relation(&format!("σ({})", adults), &students.select(adults.clone()))?;
    print_relation("ρ(identifier ← id)", &students.rename("identifier", "id"))?;
    print_relation(
        "τ(age desc)",
        &students.order_by([("age", SortOrder::Descending)]),
    )?;
    let next_year = Predicate::ge(
        NumericExpression::add_expr(
            NumericExpression::attribute("age"),
            NumericExpression::literal(1i64),
        ),
        Value::Integer(22),
    );
    print_relation(
        &format!("σ({})", next_year),
        &students.select(next_year.clone()),
    )?;

    // Errors surface as values, never as panics
    if let Err(e) = students.project(["salary"]).header() {
        println!("π(salary) failed: {}\n", e);
    }
    Ok(())
}

fn joins_demo(students: &Relation, enrollments: &Relation) -> Result<()> {
    print_relation("students ⋈ enrollments", &students.natural_join(enrollments))?;
    let art = Predicate::eq(Expression::attribute("course"), Value::string("art"));
    print_relation(
        &format!("students ⋈[{}] enrollments", art),
        &students.theta_join(enrollments, art.clone()),
    )?;

    let math = Predicate::eq(Expression::attribute("course"), Value::string("math"));
    let math_enrollments = enrollments.select(math.clone());
    print_relation(
        &format!("students ⋉ σ({}) enrollments", math),
        &students.left_semi_join(&math_enrollments),
    )?;
    print_relation(
        &format!("students ▷ σ({}) enrollments", math),
        &students.anti_semi_join(&math_enrollments),
    )?;
    Ok(())
}

fn division_demo(enrollments: &Relation) -> Result<()> {
    let courses = courses();
    print_relation("courses", &courses)?;
    print_relation("enrollments ÷ courses", &enrollments.divide(&courses))?;
    Ok(())
}
