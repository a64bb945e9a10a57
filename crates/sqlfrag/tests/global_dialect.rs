use sqlfrag::{DatasourceConfig, Dialect, Entity, EntityQuery, QueryError};

#[derive(Entity)]
#[orm(table = "t_order")]
struct OrderVo {
    order_no: Option<String>,
}

#[test]
fn global_dialect_from_config() {
    let vo = OrderVo {
        order_no: Some("A-1".into()),
    };
    assert!(matches!(
        EntityQuery::with_global_dialect(&vo),
        Err(QueryError::Config(_))
    ));

    let cfg = DatasourceConfig::from_toml_str(
        r#"
        [datasource]
        driver_class_name = "org.postgresql.Driver"
        "#,
    )
    .unwrap();
    assert_eq!(cfg.init_global().unwrap(), Dialect::Postgres);
    assert_eq!(Dialect::global(), Some(Dialect::Postgres));

    // set once
    let again = DatasourceConfig::from_driver_class("com.mysql.cj.jdbc.Driver");
    assert!(again.init_global().is_err());
    assert_eq!(Dialect::global(), Some(Dialect::Postgres));

    let built = EntityQuery::with_global_dialect(&vo).unwrap().build().unwrap();
    assert_eq!(
        built.sql,
        "select order_no from t_order where '1' = '1'  and order_no = 'A-1'"
    );
}
