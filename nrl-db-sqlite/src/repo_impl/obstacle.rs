use super::*;

impl ObstacleRepo for DbReadOnly<'_> {
    fn create_obstacle(&self, _obstacle: &NewObstacle) -> Result<ObstacleId> {
        Err(read_only_violation())
    }

    fn get_obstacle(&self, id: ObstacleId) -> Result<Obstacle> {
        get_obstacle(&mut self.conn.borrow_mut(), id)
    }

    fn list_obstacles(&self, query: &ObstacleQuery) -> Result<Vec<ObstacleSummary>> {
        list_obstacles(&mut self.conn.borrow_mut(), query)
    }

    fn count_obstacles(&self) -> Result<usize> {
        count_obstacles(&mut self.conn.borrow_mut())
    }

    fn update_owned_obstacle(
        &self,
        _id: ObstacleId,
        _owner: &UserId,
        _update: &ObstacleUpdate,
    ) -> Result<()> {
        Err(read_only_violation())
    }

    fn delete_owned_obstacle(&self, _id: ObstacleId, _owner: &UserId) -> Result<()> {
        Err(read_only_violation())
    }

    fn set_review_status(&self, _id: ObstacleId, _review: &ReviewAction) -> Result<()> {
        Err(read_only_violation())
    }
}

macro_rules! writable_obstacle_repo {
    ($db:ty) => {
        impl ObstacleRepo for $db {
            fn create_obstacle(&self, obstacle: &NewObstacle) -> Result<ObstacleId> {
                create_obstacle(&mut self.conn.borrow_mut(), obstacle)
            }

            fn get_obstacle(&self, id: ObstacleId) -> Result<Obstacle> {
                get_obstacle(&mut self.conn.borrow_mut(), id)
            }

            fn list_obstacles(&self, query: &ObstacleQuery) -> Result<Vec<ObstacleSummary>> {
                list_obstacles(&mut self.conn.borrow_mut(), query)
            }

            fn count_obstacles(&self) -> Result<usize> {
                count_obstacles(&mut self.conn.borrow_mut())
            }

            fn update_owned_obstacle(
                &self,
                id: ObstacleId,
                owner: &UserId,
                update: &ObstacleUpdate,
            ) -> Result<()> {
                update_owned_obstacle(&mut self.conn.borrow_mut(), id, owner, update)
            }

            fn delete_owned_obstacle(&self, id: ObstacleId, owner: &UserId) -> Result<()> {
                delete_owned_obstacle(&mut self.conn.borrow_mut(), id, owner)
            }

            fn set_review_status(&self, id: ObstacleId, review: &ReviewAction) -> Result<()> {
                set_review_status(&mut self.conn.borrow_mut(), id, review)
            }
        }
    };
}

writable_obstacle_repo!(DbReadWrite<'_>);
writable_obstacle_repo!(DbConnection<'_>);

fn create_obstacle(conn: &mut SqliteConnection, obstacle: &NewObstacle) -> Result<ObstacleId> {
    let NewObstacle {
        geometry,
        name,
        description,
        height_m,
        is_draft,
        review_status,
        created_by,
        created_at,
    } = obstacle;
    let new_obstacle = models::NewObstacle {
        geojson: geometry.as_str(),
        obstacle_name: name,
        height_m: Some(i64::from(*height_m)),
        obstacle_description: description.as_deref(),
        is_draft: *is_draft,
        created_utc: created_at.as_millis(),
        created_by_user_id: created_by.as_ref().map(UserId::as_str),
        review_status: review_status.map(store_review_status),
    };
    diesel::insert_into(schema::obstacles::table)
        .values(&new_obstacle)
        .execute(conn)
        .map_err(from_diesel_err)?;
    let id = diesel::select(last_insert_rowid())
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(id.into())
}

fn get_obstacle(conn: &mut SqliteConnection, id: ObstacleId) -> Result<Obstacle> {
    let entity = schema::obstacles::table
        .find(id.to_inner())
        .first::<models::ObstacleEntity>(conn)
        .map_err(from_diesel_err)?;
    load_obstacle(entity)
}

fn list_obstacles(
    conn: &mut SqliteConnection,
    query: &ObstacleQuery,
) -> Result<Vec<ObstacleSummary>> {
    use schema::obstacles::dsl;

    let ObstacleQuery {
        id,
        name,
        min_height_m,
        max_height_m,
        state,
        created_from,
        created_to,
        created_by,
    } = query;

    let mut db_query = schema::obstacles::table
        .order_by(dsl::id.desc())
        .into_boxed();
    if let Some(id) = id {
        db_query = db_query.filter(dsl::id.eq(id.to_inner()));
    }
    if let Some(name) = name.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
        // SQLite's LIKE only folds ASCII letters
        let pattern = format!("%{}%", escape_like_pattern(&name.to_lowercase()));
        db_query = db_query.filter(unicode_lower(dsl::obstacle_name).like(pattern).escape('\\'));
    }
    if let Some(min_height_m) = min_height_m {
        db_query = db_query.filter(dsl::height_m.ge(i64::from(*min_height_m)));
    }
    if let Some(max_height_m) = max_height_m {
        db_query = db_query.filter(dsl::height_m.le(i64::from(*max_height_m)));
    }
    if let Some(state) = state {
        db_query = match state {
            ObstacleState::Draft => db_query.filter(dsl::is_draft.eq(true)),
            ObstacleState::Pending => db_query.filter(dsl::is_draft.eq(false)).filter(
                dsl::review_status
                    .is_null()
                    .or(dsl::review_status.eq(store_review_status(ReviewStatus::Pending))),
            ),
            ObstacleState::Approved | ObstacleState::Rejected => {
                let status = state.review_status().map(store_review_status);
                db_query
                    .filter(dsl::is_draft.eq(false))
                    .filter(dsl::review_status.eq(status))
            }
        };
    }
    if let Some(created_from) = created_from {
        db_query = db_query.filter(dsl::created_utc.ge(created_from.as_millis()));
    }
    if let Some(created_to) = created_to {
        db_query = db_query.filter(dsl::created_utc.le(created_to.as_millis()));
    }
    if let Some(created_by) = created_by {
        db_query = db_query.filter(dsl::created_by_user_id.eq(created_by.as_str()));
    }

    let rows = db_query
        .load::<models::ObstacleEntity>(conn)
        .map_err(from_diesel_err)?;
    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        results.push(load_obstacle(row)?.into());
    }
    Ok(results)
}

fn count_obstacles(conn: &mut SqliteConnection) -> Result<usize> {
    Ok(schema::obstacles::table
        .select(diesel::dsl::count(schema::obstacles::dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn update_owned_obstacle(
    conn: &mut SqliteConnection,
    id: ObstacleId,
    owner: &UserId,
    update: &ObstacleUpdate,
) -> Result<()> {
    use schema::obstacles::dsl;
    let ObstacleUpdate {
        geometry,
        name,
        description,
        height_m,
        is_draft,
        review_status,
    } = update;
    let count = diesel::update(
        schema::obstacles::table
            .filter(dsl::id.eq(id.to_inner()))
            .filter(dsl::created_by_user_id.eq(owner.as_str()))
            .filter(dsl::is_draft.eq(true)),
    )
    .set((
        geometry.as_ref().map(|geometry| dsl::geojson.eq(geometry.as_str())),
        dsl::obstacle_name.eq(name),
        dsl::obstacle_description.eq(description.as_deref()),
        dsl::height_m.eq(Some(i64::from(*height_m))),
        dsl::is_draft.eq(*is_draft),
        dsl::review_status.eq(review_status.map(store_review_status)),
    ))
    .execute(conn)
    .map_err(from_diesel_err)?;
    debug_assert!(count <= 1);
    if count == 0 {
        return Err(repo::Error::NotOwnedOrMissing);
    }
    Ok(())
}

fn delete_owned_obstacle(conn: &mut SqliteConnection, id: ObstacleId, owner: &UserId) -> Result<()> {
    use schema::obstacles::dsl;
    let count = diesel::delete(
        schema::obstacles::table
            .filter(dsl::id.eq(id.to_inner()))
            .filter(dsl::created_by_user_id.eq(owner.as_str()))
            .filter(dsl::is_draft.eq(true)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    debug_assert!(count <= 1);
    if count == 0 {
        return Err(repo::Error::NotOwnedOrMissing);
    }
    Ok(())
}

fn set_review_status(conn: &mut SqliteConnection, id: ObstacleId, review: &ReviewAction) -> Result<()> {
    use schema::obstacles::dsl;
    let ReviewAction {
        status,
        comment,
        reviewer,
    } = review;
    let count = diesel::update(schema::obstacles::table.filter(dsl::id.eq(id.to_inner())))
        .set((
            dsl::review_status.eq(Some(store_review_status(*status))),
            dsl::review_comment.eq(comment.as_deref()),
            dsl::assigned_to_user_id.eq(Some(reviewer.as_str())),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    debug_assert!(count <= 1);
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn load_obstacle(entity: models::ObstacleEntity) -> Result<Obstacle> {
    let models::ObstacleEntity {
        id,
        geojson,
        obstacle_name,
        height_m,
        obstacle_description,
        is_draft,
        created_utc,
        created_by_user_id,
        review_status,
        review_comment,
        assigned_to_user_id,
    } = entity;
    let height_m = height_m
        .map(u32::try_from)
        .transpose()
        .map_err(|_| anyhow!("Invalid height of obstacle {id}: {height_m:?}"))?;
    let review_status = review_status
        .as_deref()
        .map(load_review_status)
        .transpose()?;
    Ok(Obstacle {
        id: id.into(),
        geometry: geojson.into(),
        name: obstacle_name,
        description: obstacle_description,
        height_m,
        is_draft,
        review_status,
        review_comment,
        created_by: created_by_user_id.map(Into::into),
        assigned_to: assigned_to_user_id.map(Into::into),
        created_at: Timestamp::from_millis(created_utc),
    })
}

fn escape_like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT: &str = r#"{"type":"Point","coordinates":[10.0,53.5]}"#;

    fn setup() -> Connections {
        let connections = Connections::init(":memory:", 1).unwrap();
        run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
        connections
    }

    fn new_obstacle(name: &str, height_m: u32, state: ObstacleState, owner: &str) -> NewObstacle {
        NewObstacle {
            geometry: POINT.parse().unwrap(),
            name: name.into(),
            description: None,
            height_m,
            is_draft: state.is_draft(),
            review_status: state.review_status(),
            created_by: Some(owner.into()),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn create_and_get_obstacle() {
        let db = setup();
        let conn = db.exclusive().unwrap();
        let mut new = new_obstacle("Mast", 15, ObstacleState::Pending, "alice");
        new.description = Some("Radio mast".into());
        let id = conn.create_obstacle(&new).unwrap();
        let obstacle = conn.get_obstacle(id).unwrap();
        assert_eq!(id, obstacle.id);
        assert_eq!("Mast", obstacle.name);
        assert_eq!(Some("Radio mast"), obstacle.description.as_deref());
        assert_eq!(Some(15), obstacle.height_m);
        assert_eq!(POINT, obstacle.geometry.as_str());
        assert_eq!(ObstacleState::Pending, obstacle.state());
        assert_eq!(Some(&UserId::from("alice")), obstacle.created_by.as_ref());
        assert_eq!(new.created_at, obstacle.created_at);
        assert!(obstacle.assigned_to.is_none());
    }

    #[test]
    fn get_missing_obstacle() {
        let db = setup();
        let conn = db.shared().unwrap();
        assert!(matches!(
            conn.get_obstacle(ObstacleId::new(42)),
            Err(repo::Error::NotFound)
        ));
    }

    #[test]
    fn read_only_connection_rejects_writes() {
        let db = setup();
        let conn = db.shared().unwrap();
        let new = new_obstacle("Mast", 15, ObstacleState::Draft, "alice");
        assert!(matches!(
            conn.create_obstacle(&new),
            Err(repo::Error::Other(_))
        ));
        assert_eq!(0, conn.count_obstacles().unwrap());
    }

    #[test]
    fn list_newest_first_with_filters() {
        let db = setup();
        let conn = db.exclusive().unwrap();
        let crane = conn
            .create_obstacle(&new_obstacle("Crane", 40, ObstacleState::Pending, "alice"))
            .unwrap();
        let mast = conn
            .create_obstacle(&new_obstacle("Radio Mast", 15, ObstacleState::Draft, "bob"))
            .unwrap();
        let tower = conn
            .create_obstacle(&new_obstacle("Tower_1", 120, ObstacleState::Approved, "alice"))
            .unwrap();
        assert_eq!(3, conn.count_obstacles().unwrap());

        let ids = |query: ObstacleQuery| {
            conn.list_obstacles(&query)
                .unwrap()
                .into_iter()
                .map(|summary| summary.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(vec![tower, mast, crane], ids(Default::default()));
        assert_eq!(
            vec![mast],
            ids(ObstacleQuery {
                name: Some("MAST".into()),
                ..Default::default()
            })
        );
        // Wildcards are matched literally
        assert_eq!(
            vec![tower],
            ids(ObstacleQuery {
                name: Some("_".into()),
                ..Default::default()
            })
        );
        assert_eq!(
            vec![tower, crane],
            ids(ObstacleQuery::default().owned_by("alice".into()))
        );
        assert_eq!(
            vec![crane],
            ids(ObstacleQuery {
                min_height_m: Some(20),
                max_height_m: Some(100),
                ..Default::default()
            })
        );
        for (state, expected) in [
            (ObstacleState::Draft, vec![mast]),
            (ObstacleState::Pending, vec![crane]),
            (ObstacleState::Approved, vec![tower]),
            (ObstacleState::Rejected, vec![]),
        ] {
            assert_eq!(
                expected,
                ids(ObstacleQuery {
                    state: Some(state),
                    ..Default::default()
                })
            );
        }
        assert_eq!(
            vec![crane],
            ids(ObstacleQuery {
                id: Some(crane),
                ..Default::default()
            })
        );
    }

    #[test]
    fn filter_names_case_insensitive_beyond_ascii() {
        let db = setup();
        let conn = db.exclusive().unwrap();
        let mast = conn
            .create_obstacle(&new_obstacle("Ærøy mast", 30, ObstacleState::Pending, "alice"))
            .unwrap();
        conn.create_obstacle(&new_obstacle("Aeroy crane", 30, ObstacleState::Pending, "alice"))
            .unwrap();
        for name in ["ærøy", "ÆRØY", "Ærøy MAST"] {
            let found = conn
                .list_obstacles(&ObstacleQuery {
                    name: Some(name.into()),
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(vec![mast], found.into_iter().map(|s| s.id).collect::<Vec<_>>());
        }
    }

    #[test]
    fn created_bounds_are_inclusive() {
        let db = setup();
        let conn = db.exclusive().unwrap();
        let ids = [1_000, 2_000, 3_000].map(|millis| {
            let mut new = new_obstacle("Mast", 15, ObstacleState::Pending, "alice");
            new.created_at = Timestamp::from_millis(millis);
            conn.create_obstacle(&new).unwrap()
        });
        let created_between = |from: i64, to: i64| {
            conn.list_obstacles(&ObstacleQuery {
                created_from: Some(Timestamp::from_millis(from)),
                created_to: Some(Timestamp::from_millis(to)),
                ..Default::default()
            })
            .unwrap()
            .into_iter()
            .map(|summary| summary.id)
            .collect::<Vec<_>>()
        };
        assert_eq!(vec![ids[2], ids[1]], created_between(2_000, 3_000));
        assert_eq!(vec![ids[1]], created_between(2_000, 2_000));
        assert_eq!(vec![ids[1], ids[0]], created_between(0, 2_000));
        assert!(created_between(1_001, 1_999).is_empty());
    }

    #[test]
    fn update_and_delete_only_own_drafts() {
        let db = setup();
        let conn = db.exclusive().unwrap();
        let draft = conn
            .create_obstacle(&new_obstacle("Mast", 15, ObstacleState::Draft, "alice"))
            .unwrap();
        let pending = conn
            .create_obstacle(&new_obstacle("Crane", 40, ObstacleState::Pending, "alice"))
            .unwrap();
        let update = ObstacleUpdate {
            geometry: None,
            name: "Big mast".into(),
            description: Some("Red and white".into()),
            height_m: 20,
            is_draft: false,
            review_status: Some(ReviewStatus::Pending),
        };

        let bob = UserId::from("bob");
        let alice = UserId::from("alice");
        assert!(matches!(
            conn.update_owned_obstacle(draft, &bob, &update),
            Err(repo::Error::NotOwnedOrMissing)
        ));
        assert!(matches!(
            conn.update_owned_obstacle(pending, &alice, &update),
            Err(repo::Error::NotOwnedOrMissing)
        ));
        assert!(matches!(
            conn.delete_owned_obstacle(draft, &bob),
            Err(repo::Error::NotOwnedOrMissing)
        ));
        assert!(matches!(
            conn.delete_owned_obstacle(ObstacleId::new(99), &alice),
            Err(repo::Error::NotOwnedOrMissing)
        ));
        assert_eq!("Mast", conn.get_obstacle(draft).unwrap().name);

        conn.update_owned_obstacle(draft, &alice, &update).unwrap();
        let updated = conn.get_obstacle(draft).unwrap();
        assert_eq!("Big mast", updated.name);
        assert_eq!(Some(20), updated.height_m);
        assert_eq!(POINT, updated.geometry.as_str());
        assert_eq!(ObstacleState::Pending, updated.state());

        // No longer a draft
        assert!(matches!(
            conn.delete_owned_obstacle(draft, &alice),
            Err(repo::Error::NotOwnedOrMissing)
        ));
        assert_eq!(2, conn.count_obstacles().unwrap());
    }

    #[test]
    fn delete_own_draft() {
        let db = setup();
        let conn = db.exclusive().unwrap();
        let draft = conn
            .create_obstacle(&new_obstacle("Mast", 15, ObstacleState::Draft, "alice"))
            .unwrap();
        conn.delete_owned_obstacle(draft, &"alice".into()).unwrap();
        assert!(matches!(
            conn.get_obstacle(draft),
            Err(repo::Error::NotFound)
        ));
    }

    #[test]
    fn set_review_status_of_any_obstacle() {
        let db = setup();
        let conn = db.exclusive().unwrap();
        let id = conn
            .create_obstacle(&new_obstacle("Mast", 15, ObstacleState::Pending, "alice"))
            .unwrap();
        let review = ReviewAction {
            status: ReviewStatus::Rejected,
            comment: Some("Duplicate".into()),
            reviewer: "carol".into(),
        };
        conn.set_review_status(id, &review).unwrap();
        let reviewed = conn.get_obstacle(id).unwrap();
        assert_eq!(ObstacleState::Rejected, reviewed.state());
        assert_eq!(Some("Duplicate"), reviewed.review_comment.as_deref());
        assert_eq!(Some(&UserId::from("carol")), reviewed.assigned_to.as_ref());
        assert!(matches!(
            conn.set_review_status(ObstacleId::new(99), &review),
            Err(repo::Error::NotFound)
        ));
    }

    #[test]
    fn rollback_transaction_on_error() {
        let db = setup();
        let mut conn = db.exclusive().unwrap();
        let res = conn.transaction(|conn| {
            conn.create_obstacle(&new_obstacle("Mast", 15, ObstacleState::Draft, "alice"))?;
            Err::<(), _>(uc::Error::Forbidden)
        });
        assert!(matches!(res, Err(uc::Error::Forbidden)));
        assert_eq!(0, conn.count_obstacles().unwrap());
    }
}
