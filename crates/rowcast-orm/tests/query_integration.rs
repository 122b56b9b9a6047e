//! End-to-end queries against an in-memory SQLite database.

use rowcast_core::registry::{install, Registry};
use rowcast_core::{
    col, Affinity, ColumnMeta, ColumnValue, CriteriaError, DataRow, Entity, Expr, Limit,
    MapError, OrderSpec, RegistryError, TableMeta,
};
use rowcast_orm::{api, LoggingDriver, OrmError, PageRequest, QuerySet, SqlDriver, SqliteDriver};

static USER_COLUMNS: [ColumnMeta; 3] = [
    ColumnMeta::new("id", Affinity::Integer, false, None, 1, true),
    ColumnMeta::new("name", Affinity::Text, false, None, 0, false),
    ColumnMeta::new("age", Affinity::Integer, true, None, 0, false),
];
static USER: TableMeta = TableMeta::new("User", "User", &USER_COLUMNS);

static SAMPLE_COLUMNS: [ColumnMeta; 6] = [
    ColumnMeta::new("id", Affinity::Integer, false, None, 1, false),
    ColumnMeta::new("score", Affinity::Real, false, None, 0, false),
    ColumnMeta::new("label", Affinity::Text, true, None, 0, false),
    ColumnMeta::new("payload", Affinity::Blob, true, None, 0, false),
    ColumnMeta::new("price", Affinity::Numeric, true, None, 0, false),
    ColumnMeta::new("extra", Affinity::Unknown, true, None, 0, false),
];
static SAMPLE: TableMeta = TableMeta::new("sample", "Sample", &SAMPLE_COLUMNS);

struct TestRegistry;

impl rowcast_core::OrmRegistry for TestRegistry {
    fn tables(&self) -> &[TableMeta] {
        std::slice::from_ref(&USER)
    }
}

static TEST_REGISTRY: TestRegistry = TestRegistry;

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: i64,
    name: String,
    age: Option<i64>,
}

impl Entity for User {
    const TYPE_ID: &'static str = "User";

    fn from_row(row: &DataRow) -> Result<Self, MapError> {
        Ok(Self {
            id: row.required("id")?,
            name: row.required("name")?,
            age: row.optional("age")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Sample {
    id: i64,
    score: f64,
    label: Option<String>,
    payload: Option<Vec<u8>>,
    price: Option<String>,
}

impl Entity for Sample {
    const TYPE_ID: &'static str = "Sample";

    fn from_row(row: &DataRow) -> Result<Self, MapError> {
        Ok(Self {
            id: row.required("id")?,
            score: row.required("score")?,
            label: row.optional("label")?,
            payload: row.optional("payload")?,
            price: row.optional("price")?,
        })
    }
}

fn users_driver(count: i64) -> SqliteDriver {
    let driver = SqliteDriver::in_memory().unwrap();
    driver
        .execute(
            "CREATE TABLE User (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL, age INTEGER)",
        )
        .unwrap();
    for i in 1..=count {
        driver
            .execute_statement("INSERT INTO User (name, age) VALUES (?, ?)", 2, &|stmt| {
                stmt.bind_string(0, &format!("user{i}"));
                if i % 5 == 0 {
                    stmt.bind_null(1);
                } else {
                    stmt.bind_long(1, 20 + i);
                }
            })
            .unwrap();
    }
    driver
}

#[test]
fn test_select_rows_with_criteria() {
    let driver = users_driver(3);
    driver
        .execute("INSERT INTO User (id, name, age) VALUES (10, 'salih', 40)")
        .unwrap();
    let criteria = col("name").eq("salih").and(col("id").eq(10));
    let rows = api::select_rows(&driver, &USER, Some(&criteria), &[], None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].required::<String>("name").unwrap(), "salih");
    assert_eq!(rows[0].names().collect::<Vec<_>>(), vec!["id", "name", "age"]);
}

#[test]
fn test_pagination_with_total() {
    let driver = users_driver(25);
    let order = [OrderSpec::asc("id")];

    let second = api::page_rows(&driver, &USER, None, &order, PageRequest::new(2, 10).with_total())
        .unwrap();
    assert_eq!(second.items.len(), 10);
    assert_eq!(second.total, Some(25));
    assert!(second.has_next);
    assert_eq!(second.items[0].required::<i64>("id").unwrap(), 11);

    let third = api::page_rows(&driver, &USER, None, &order, PageRequest::new(3, 10).with_total())
        .unwrap();
    assert_eq!(third.items.len(), 5);
    assert_eq!(third.total, Some(25));
    assert!(!third.has_next);
}

#[test]
fn test_pagination_without_total_and_clamping() {
    let driver = users_driver(25);
    let first = api::page_rows(&driver, &USER, None, &[], PageRequest::new(0, 10)).unwrap();
    assert_eq!(first.page, 1);
    assert_eq!(first.total, None);
    assert!(first.has_next);

    let last = api::page_rows(&driver, &USER, None, &[], PageRequest::new(3, 10)).unwrap();
    assert_eq!(last.items.len(), 5);
    assert!(!last.has_next);
}

#[test]
fn test_count_reuses_criteria() {
    let driver = users_driver(25);
    assert_eq!(api::count(&driver, &USER, None).unwrap(), 25);
    assert_eq!(
        api::count(&driver, &USER, Some(&col("age").is_null())).unwrap(),
        5
    );
    let criteria = col("age").between(21, 25).or(col("name").eq("user25"));
    assert_eq!(api::count(&driver, &USER, Some(&criteria)).unwrap(), 5);
}

#[test]
fn test_round_trip_every_affinity() {
    let registry = Registry::new(vec![SAMPLE.clone()]);
    let driver = SqliteDriver::in_memory().unwrap();
    driver
        .execute(
            "CREATE TABLE sample (id INTEGER PRIMARY KEY, score REAL NOT NULL, \
             label TEXT, payload BLOB, price NUMERIC, extra)",
        )
        .unwrap();
    let expected = Sample {
        id: 1,
        score: 9.75,
        label: Some("first".into()),
        payload: Some(vec![0, 1, 2, 254, 255]),
        price: Some("12.5".into()),
    };
    driver
        .execute_statement(
            "INSERT INTO sample (id, score, label, payload, price, extra) VALUES (?, ?, ?, ?, ?, ?)",
            6,
            &|stmt| {
                stmt.bind_long(0, expected.id);
                stmt.bind_double(1, expected.score);
                stmt.bind_string(2, "first");
                stmt.bind_bytes(3, &[0, 1, 2, 254, 255]);
                stmt.bind_string(4, "12.5");
                stmt.bind_long(5, 77);
            },
        )
        .unwrap();
    driver
        .execute("INSERT INTO sample (id, score) VALUES (2, 0.5)")
        .unwrap();

    let samples: Vec<Sample> = api::select_in(
        &driver,
        &registry,
        None,
        &[OrderSpec::asc("id")],
        None,
    )
    .unwrap();
    assert_eq!(samples[0], expected);
    assert_eq!(
        samples[1],
        Sample {
            id: 2,
            score: 0.5,
            label: None,
            payload: None,
            price: None,
        }
    );

    let rows = api::select_rows(&driver, &SAMPLE, Some(&col("id").eq(1)), &[], None).unwrap();
    assert_eq!(rows[0].required::<i64>("extra").unwrap(), 77);
}

#[test]
fn test_null_in_required_column_names_the_column() {
    let driver = users_driver(5);
    let registry = Registry::new(vec![USER.clone()]);
    let strict = |row: &DataRow| row.required::<i64>("age");
    let err = api::select_mapped(&driver, &USER, &strict, None, &[], None).unwrap_err();
    match err {
        OrmError::Map(MapError::NullViolation { column }) => assert_eq!(column, "age"),
        other => panic!("unexpected error: {other:?}"),
    }
    let users: Vec<User> = api::select_in(&driver, &registry, None, &[], None).unwrap();
    assert_eq!(users.len(), 5);
    assert_eq!(users[4].age, None);
}

#[test]
fn test_mismatched_storage_class_is_not_read_as_null() {
    let driver = SqliteDriver::in_memory().unwrap();
    driver
        .execute("CREATE TABLE User (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age INTEGER)")
        .unwrap();
    driver
        .execute("INSERT INTO User (id, name, age) VALUES (1, 'a', 3.5), (2, 'b', 'abc')")
        .unwrap();

    let rows = api::select_rows(&driver, &USER, None, &[OrderSpec::asc("id")], None).unwrap();
    assert_eq!(rows[0].get("age"), Some(&ColumnValue::Real(3.5)));
    assert_eq!(rows[1].get("age"), Some(&ColumnValue::Text("abc".into())));

    let registry = Registry::new(vec![USER.clone()]);
    let err = api::select_in::<User, _>(&driver, &registry, None, &[], None).unwrap_err();
    assert!(matches!(
        err,
        OrmError::Map(MapError::TypeMismatch { ref column, expected: "INTEGER", found: "REAL" })
            if column == "age"
    ));
}

#[test]
fn test_untyped_column_keeps_text_digits() {
    let driver = SqliteDriver::in_memory().unwrap();
    driver
        .execute(
            "CREATE TABLE sample (id INTEGER PRIMARY KEY, score REAL NOT NULL, \
             label TEXT, payload BLOB, price NUMERIC, extra)",
        )
        .unwrap();
    driver
        .execute("INSERT INTO sample (id, score, extra) VALUES (1, 1.0, '007')")
        .unwrap();

    let rows = api::select_rows(&driver, &SAMPLE, None, &[], None).unwrap();
    assert_eq!(rows[0].get("extra"), Some(&ColumnValue::Text("007".into())));
    assert_eq!(rows[0].required::<String>("extra").unwrap(), "007");
}

#[test]
fn test_unknown_type_id() {
    let driver = users_driver(1);
    let empty = Registry::default();
    let err = api::select_in::<User, _>(&driver, &empty, None, &[], None).unwrap_err();
    assert!(matches!(
        err,
        OrmError::Registry(RegistryError::UnknownTypeId(id)) if id == "User"
    ));
}

#[test]
fn test_empty_in_list_is_rejected_before_execution() {
    let driver = users_driver(1);
    let criteria = col("id").in_list(Vec::<i64>::new());
    let err = api::select_rows(&driver, &USER, Some(&criteria), &[], None).unwrap_err();
    assert!(matches!(err, OrmError::Criteria(_)));
}

#[test]
fn test_empty_combinator_rejected_by_select_and_count() {
    let driver = users_driver(3);
    let empty = Expr::And(vec![]);
    let select = api::select_rows(&driver, &USER, Some(&empty), &[], None).unwrap_err();
    let count = api::count(&driver, &USER, Some(&empty)).unwrap_err();
    for err in [select, count] {
        assert!(matches!(
            err,
            OrmError::Criteria(CriteriaError::EmptyCombinator("and"))
        ));
    }
}

#[test]
fn test_driver_error_surfaces_unchanged() {
    let driver = SqliteDriver::in_memory().unwrap();
    let err = api::select_rows(&driver, &USER, None, &[], Some(Limit::first(1))).unwrap_err();
    assert!(matches!(err, OrmError::Database(_)));
}

#[test]
fn test_global_registry_select() {
    let _ = install(&TEST_REGISTRY);
    let driver = users_driver(12);
    let users: Vec<User> = api::select(
        &driver,
        Some(&col("name").starts_with("user1")),
        &[OrderSpec::desc("id")],
        Some(Limit::new(2, 1)),
    )
    .unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![11, 10]);

    let page = api::page::<User, _>(&driver, None, &[], PageRequest::new(2, 5).with_total()).unwrap();
    assert_eq!(page.items[0].id, 6);
    assert!(page.has_next);
}

#[test]
fn test_queryset_terminal_operations() {
    let driver = users_driver(25);
    let qs = QuerySet::<User>::with_registry(&TEST_REGISTRY)
        .filter(col("age").is_not_null())
        .exclude(col("id").lt(10));

    assert_eq!(qs.count(&driver).unwrap(), 12);
    assert!(qs.exists(&driver).unwrap());

    let top = qs.clone().order_by("-age").limit(3).fetch(&driver).unwrap();
    assert_eq!(top.iter().map(|u| u.id).collect::<Vec<_>>(), vec![24, 23, 22]);

    let skipped = qs.clone().order_by("id").offset(11).fetch(&driver).unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].id, 24);

    let first = qs.clone().order_by("id").first(&driver).unwrap().unwrap();
    assert_eq!(first.id, 11);

    let one = qs.clone().filter(col("name").eq("user12")).get(&driver).unwrap();
    assert_eq!(one.age, Some(32));
    assert!(matches!(
        qs.clone().filter(col("name").eq("nobody")).get(&driver),
        Err(OrmError::NotFound)
    ));
    assert!(matches!(qs.get(&driver), Err(OrmError::MultipleObjectsReturned)));

    let page = qs.page(&driver, PageRequest::new(2, 10).with_total()).unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, Some(12));
    assert!(!page.has_next);
}

#[test]
fn test_logging_driver_is_transparent() {
    let driver = LoggingDriver::new(users_driver(4));
    let rows = api::select_rows(
        &driver,
        &USER,
        Some(&col("id").in_list([1, 3])),
        &[OrderSpec::asc("id")],
        None,
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].required::<String>("name").unwrap(), "user3");
}
