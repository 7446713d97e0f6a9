use sql_forge::entity;
use sql_forge::prelude::*;
use sql_forge::sqlite::{SqliteConfig, SqliteConnection};

entity! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Person {
        pub id: u64,
        pub name: String,
        pub age: i64,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Author {
        pub id: u64,
        pub name: String,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Book {
        pub id: u64,
        pub name: String,
        pub author_id: u64,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Thing {
        pub id: u64,
        pub name: String,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Tag {
        pub id: u64,
        pub name: String,
    }
}

fn manager() -> EntityManager<SqliteConnection> {
    let mut conn = SqliteConnection::connect(&SqliteConfig::in_memory()).unwrap();
    conn.execute(
        "CREATE TABLE person (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, age INT);
         CREATE TABLE author (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);
         CREATE TABLE book (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, author_id INT);
         CREATE TABLE thing (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);
         CREATE TABLE tag (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);
         CREATE TABLE tag_thing (thing_id INT, tag_id INT);",
    )
    .unwrap();
    EntityManager::new(conn)
}

fn person(name: &str, age: i64) -> Person {
    Person {
        id: 0,
        name: name.to_string(),
        age,
    }
}

#[test]
fn naming_conventions() {
    assert_eq!(Person::table(), "person");
    assert_eq!(Person::columns(), &["id", "name", "age"][..]);
    assert_eq!(
        person("Ada", 36).field("age"),
        Some(DbValue::Int64(36))
    );
    assert!(person("Ada", 36).field("height").is_none());
}

#[test]
fn store_then_get_round_trips() -> Result<(), SqlForgeError> {
    let mut db = manager();
    let ada = person("Ada", 36);
    let id = db.store(&ada)?;
    assert_ne!(id, 0);

    let loaded: Person = db.get(id)?.unwrap();
    assert_eq!(loaded.name, ada.name);
    assert_eq!(loaded.age, ada.age);
    assert_eq!(loaded.id, id);

    assert!(db.get::<Person>(9999)?.is_none());
    Ok(())
}

#[test]
fn save_inserts_once_then_updates() -> Result<(), SqlForgeError> {
    let mut db = manager();
    let mut ada = person("Ada", 36);

    db.save(&mut ada)?;
    let id = ada.id;
    assert_ne!(id, 0);

    ada.age = 37;
    db.save(&mut ada)?;
    assert_eq!(ada.id, id);

    let loaded: Person = db.get(id)?.unwrap();
    assert_eq!(loaded.age, 37);
    assert_eq!(db.find::<Person>().count_via(db.connection())?, 1);
    Ok(())
}

#[test]
fn update_refuses_an_unsaved_entity() {
    let mut db = manager();
    let err = db.update(&person("Ada", 36)).unwrap_err();
    assert!(matches!(err, SqlForgeError::InvalidQuery(_)));
}

#[test]
fn remove_deletes_the_row() -> Result<(), SqlForgeError> {
    let mut db = manager();
    let mut ada = person("Ada", 36);
    db.save(&mut ada)?;
    db.remove(&ada)?;
    assert!(db.get::<Person>(ada.id)?.is_none());
    Ok(())
}

#[test]
fn filtered_ordered_selection() -> Result<(), SqlForgeError> {
    let mut db = manager();
    for (name, age) in [("Ada", 36), ("Grace", 85), ("Edsger", 72)] {
        db.store(&person(name, age))?;
    }

    let query = db
        .find::<Person>()
        .and_where_set("age", Cmp::Ge, 60_i64)
        .order_by("age");
    let seniors = query.select_via(db.connection())?;

    assert_eq!(seniors.len(), 2);
    assert_eq!(seniors[0].name, "Edsger");
    assert_eq!(seniors[1].name, "Grace");
    Ok(())
}

#[test]
fn count_and_aggregate_terminals() -> Result<(), SqlForgeError> {
    let mut db = manager();
    for (name, age) in [("Ada", 36), ("Grace", 85)] {
        db.store(&person(name, age))?;
    }

    assert_eq!(db.find::<Person>().count_via(db.connection())?, 2);

    let oldest = db
        .find::<Person>()
        .aggregate_via(db.connection(), Aggregate::Max, "age")?;
    assert_eq!(oldest, DbValue::Int64(85));

    let none = db
        .find::<Person>()
        .and_where_set("age", Cmp::Gt, 200_i64)
        .count_via(db.connection())?;
    assert_eq!(none, 0);
    Ok(())
}

#[test]
fn delete_via_applies_the_filter() -> Result<(), SqlForgeError> {
    let mut db = manager();
    for (name, age) in [("Ada", 36), ("Grace", 85), ("Edsger", 72)] {
        db.store(&person(name, age))?;
    }

    db.find::<Person>()
        .and_where_set("age", Cmp::Lt, 60_i64)
        .delete_via(db.connection())?;
    assert_eq!(db.find::<Person>().count_via(db.connection())?, 2);
    Ok(())
}

#[test]
fn one_to_many_and_back() -> Result<(), SqlForgeError> {
    let mut db = manager();
    let mut knuth = Author {
        id: 0,
        name: "Knuth".into(),
    };
    db.save(&mut knuth)?;

    for name in ["TAOCP 1", "TAOCP 2"] {
        db.store(&Book {
            id: 0,
            name: name.into(),
            author_id: knuth.id,
        })?;
    }
    let orphan_id = db.store(&Book {
        id: 0,
        name: "Anonymous".into(),
        author_id: 0,
    })?;

    let books = db.one_to_many::<Book, Author>(&knuth);
    assert_eq!(books.count_via(db.connection())?, 2);

    let first: Book = db.get(1)?.unwrap();
    let author: Option<Author> = db.many_to_one(&first)?;
    assert_eq!(author.unwrap().name, "Knuth");

    // the one_to_one alias walks the same foreign key
    let orphan: Book = db.get(orphan_id)?.unwrap();
    let author: Option<Author> = db.one_to_one(&orphan)?;
    assert!(author.is_none());
    Ok(())
}

#[test]
fn many_to_many_assign_count_unassign() -> Result<(), SqlForgeError> {
    let mut db = manager();
    let mut apple = Thing {
        id: 0,
        name: "apple".into(),
    };
    db.save(&mut apple)?;
    let mut fruit = Tag {
        id: 0,
        name: "fruit".into(),
    };
    let mut red = Tag {
        id: 0,
        name: "red".into(),
    };
    db.save(&mut fruit)?;
    db.save(&mut red)?;

    db.many_to_many_assign(&fruit, &apple)?;
    db.many_to_many_assign(&red, &apple)?;

    let tags = db.many_to_many::<Tag, Thing>(&apple);
    assert_eq!(tags.count_via(db.connection())?, 2);
    let things = db.many_to_many::<Thing, Tag>(&fruit);
    assert_eq!(things.count_via(db.connection())?, 1);

    // entity mapping through the join stays positional
    let tags: Vec<Tag> = db
        .many_to_many::<Tag, Thing>(&apple)
        .order_by(col(&table("tag"), "name"))
        .select_via(db.connection())?;
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "fruit");
    assert_eq!(tags[1].name, "red");

    db.many_to_many_unassign(&red, &apple)?;
    let tags = db.many_to_many::<Tag, Thing>(&apple);
    assert_eq!(tags.count_via(db.connection())?, 1);
    Ok(())
}
