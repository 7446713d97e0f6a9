use sql_forge::prelude::*;

#[test]
fn where_with_parenthesised_group() {
    let built = table("mountain")
        .query()
        .and_where("height", Cmp::Gt)
        .and_where_group(|q| {
            q.and_where_set("location", Cmp::Eq, "US")
                .or_where_set("location", Cmp::Eq, "CA")
        })
        .select()
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(
        built.sql,
        r#"SELECT * FROM "mountain" WHERE "height" > ? AND ( "location" = ? OR "location" = ? )"#
    );
    assert_eq!(built.placeholders.where_, 3);
    assert!(built.presets.where_.get(&0).is_none());
    assert_eq!(built.presets.where_.get(&1), Some(&DbValue::Text("US".into())));
    assert_eq!(built.presets.where_.get(&2), Some(&DbValue::Text("CA".into())));
    assert!(built.presets.limit.is_none());
}

#[test]
fn order_by_terms_compile_in_insertion_order() {
    let built = table("mountain")
        .query()
        .order_by("height")
        .order_by_desc("name")
        .order_by_desc("location")
        .select()
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(
        built.sql,
        r#"SELECT * FROM "mountain" ORDER BY "height", "name" DESC, "location" DESC"#
    );
}

#[test]
fn multi_row_insert() {
    let built = table("mountain")
        .insert(["name", "location", "height"])
        .times(2)
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(
        built.sql,
        r#"INSERT INTO "mountain" ("name", "location", "height") VALUES (?,?,?), (?,?,?)"#
    );
    assert_eq!(built.placeholders.set, 6);
    assert_eq!(built.placeholders.where_, 0);
}

#[test]
fn left_outer_join_with_qualified_ordering() {
    let author = table("author");
    let book = table("book");
    let built = table("book")
        .query()
        .join(
            JoinKind::LeftOuter,
            col(&author, "id"),
            col(&book, "author_id"),
        )
        .order_by(col(&book, "name"))
        .select()
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(
        built.sql,
        r#"SELECT * FROM "book" LEFT OUTER JOIN "author" ON "author"."id" = "book"."author_id" ORDER BY "book"."name""#
    );
}

#[test]
fn select_list_with_limit_and_offset() {
    let built = table("point")
        .query()
        .and_where("x", Cmp::Gt)
        .and_where("y", Cmp::Le)
        .offset()
        .select_cols(["x", "y"])
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(
        built.sql,
        r#"SELECT "x", "y" FROM "point" WHERE "x" > ? AND "y" <= ? LIMIT ? OFFSET ?"#
    );
    assert_eq!(built.placeholders.where_, 2);
    assert!(built.placeholders.limit);
    assert!(built.placeholders.offset);
    assert_eq!(built.placeholders.total(), 4);
}

#[test]
fn limit_and_offset_presets_carry_over() {
    let built = table("mountain")
        .query()
        .limit_to(3)
        .offset_by(4)
        .select()
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(built.sql, r#"SELECT * FROM "mountain" LIMIT ? OFFSET ?"#);
    assert_eq!(built.presets.limit, Some(DbValue::UInt64(3)));
    assert_eq!(built.presets.offset, Some(DbValue::UInt64(4)));
}

#[test]
fn aggregates_and_distinct() {
    let built = table("mountain")
        .query()
        .select_exprs([count("*")])
        .build::<SqliteDialect>()
        .unwrap();
    assert_eq!(built.sql, r#"SELECT COUNT(*) FROM "mountain""#);

    let built = table("mountain")
        .query()
        .select_exprs([SelectExpr::new("height").aggregate(Aggregate::Avg).distinct()])
        .build::<SqliteDialect>()
        .unwrap();
    assert_eq!(built.sql, r#"SELECT AVG(DISTINCT "height") FROM "mountain""#);

    let built = table("mountain")
        .query()
        .select_exprs([group_concat("name"), max("height")])
        .build::<SqliteDialect>()
        .unwrap();
    assert_eq!(
        built.sql,
        r#"SELECT GROUP_CONCAT("name"), MAX("height") FROM "mountain""#
    );
}

#[test]
fn update_sets_come_before_where() {
    let built = table("mountain")
        .query()
        .and_where("id", Cmp::Eq)
        .update(["name", "height"])
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(
        built.sql,
        r#"UPDATE "mountain" SET "name" = ?, "height" = ? WHERE "id" = ?"#
    );
    assert_eq!(built.placeholders.set, 2);
    assert_eq!(built.placeholders.where_, 1);
}

#[test]
fn delete_with_nullary_operator() {
    let built = table("mountain")
        .query()
        .and_where("location", Cmp::IsNull)
        .delete()
        .build::<SqliteDialect>()
        .unwrap();

    assert_eq!(built.sql, r#"DELETE FROM "mountain" WHERE "location" IS NULL"#);
    assert_eq!(built.placeholders.where_, 0);
}

#[test]
fn column_less_insert_uses_default_values() {
    let built = table("log")
        .insert(Vec::<String>::new())
        .build::<SqliteDialect>()
        .unwrap();
    assert_eq!(built.sql, r#"INSERT INTO "log" DEFAULT VALUES"#);
    assert_eq!(built.placeholders.total(), 0);
}

#[test]
fn identifier_quotes_are_doubled() {
    let built = table(r#"we"ird"#)
        .query()
        .select()
        .build::<SqliteDialect>()
        .unwrap();
    assert_eq!(built.sql, r#"SELECT * FROM "we""ird""#);
}

#[test]
fn cross_join_has_no_on_clause() {
    let built = table("a")
        .query()
        .cross_join(table("b"))
        .select()
        .build::<SqliteDialect>()
        .unwrap();
    assert_eq!(built.sql, r#"SELECT * FROM "a" CROSS JOIN "b""#);
}

#[test]
fn negated_group() {
    let built = table("t")
        .query()
        .and_where_not_group(|q| q.and_where("a", Cmp::Eq))
        .select()
        .build::<SqliteDialect>()
        .unwrap();
    assert_eq!(built.sql, r#"SELECT * FROM "t" WHERE NOT ( "a" = ? )"#);
}

#[test]
fn ast_preconditions_are_rejected() {
    let with_join = |q: Query| {
        let author = table("author");
        let book = table("book");
        q.join(
            JoinKind::Inner,
            col(&author, "id"),
            col(&book, "author_id"),
        )
    };

    let err = table("t")
        .query()
        .update(Vec::<String>::new())
        .build::<SqliteDialect>()
        .unwrap_err();
    assert!(matches!(err, SqlForgeError::InvalidQuery(_)));

    let err = with_join(table("book").query())
        .update(["name"])
        .build::<SqliteDialect>()
        .unwrap_err();
    assert!(matches!(err, SqlForgeError::InvalidQuery(_)));

    let err = with_join(table("book").query())
        .delete()
        .build::<SqliteDialect>()
        .unwrap_err();
    assert!(matches!(err, SqlForgeError::InvalidQuery(_)));

    let err = table("t")
        .insert(["a"])
        .times(0)
        .build::<SqliteDialect>()
        .unwrap_err();
    assert!(matches!(err, SqlForgeError::InvalidQuery(_)));

    let err = table("t")
        .insert(Vec::<String>::new())
        .times(2)
        .build::<SqliteDialect>()
        .unwrap_err();
    assert!(matches!(err, SqlForgeError::InvalidQuery(_)));
}
