use super::*;

pub fn get_obstacle(
    connections: &sqlite::Connections,
    auth: &AuthContext,
    policy: AccessPolicy,
    id: ObstacleId,
) -> Result<Obstacle> {
    let db = connections.shared()?;
    Ok(usecases::get_obstacle(&db, auth, policy, id)?)
}

pub fn list_obstacles(
    connections: &sqlite::Connections,
    auth: &AuthContext,
    policy: AccessPolicy,
    query: ObstacleQuery,
) -> Result<Vec<ObstacleSummary>> {
    let db = connections.shared()?;
    Ok(usecases::list_obstacles(&db, auth, policy, query)?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn users_only_see_their_own_obstacles() {
        let fixture = BackendFixture::new();
        let first = fixture.create_obstacle("alice", usecases::SubmissionIntent::Draft);
        let foreign = fixture.create_obstacle("bob", usecases::SubmissionIntent::Final);
        let second = fixture.create_obstacle("alice", usecases::SubmissionIntent::Final);

        let alice = AuthContext::user("alice");
        let ids = flows::list_obstacles(
            &fixture.db_connections,
            &alice,
            AccessPolicy::Authenticated,
            Default::default(),
        )
        .unwrap()
        .into_iter()
        .map(|summary| summary.id)
        .collect::<Vec<_>>();
        assert_eq!(vec![second, first], ids);

        let admin = AuthContext::user("dave").with_role(Role::Admin);
        let all = flows::list_obstacles(
            &fixture.db_connections,
            &admin,
            AccessPolicy::Authenticated,
            Default::default(),
        )
        .unwrap();
        assert_eq!(3, all.len());

        let err = flows::get_obstacle(
            &fixture.db_connections,
            &alice,
            AccessPolicy::Authenticated,
            foreign,
        )
        .unwrap_err();
        assert_eq!(ErrorKind::NotOwnedOrMissing, err.kind());
        assert!(flows::get_obstacle(
            &fixture.db_connections,
            &admin,
            AccessPolicy::Authenticated,
            foreign
        )
        .is_ok());
    }

    #[test]
    fn open_access_lists_everything() {
        let fixture = BackendFixture::new();
        fixture.create_obstacle("alice", usecases::SubmissionIntent::Final);
        fixture.create_obstacle("bob", usecases::SubmissionIntent::Final);
        let all = flows::list_obstacles(
            &fixture.db_connections,
            &AuthContext::anonymous(),
            AccessPolicy::Open,
            Default::default(),
        )
        .unwrap();
        assert_eq!(2, all.len());
        let err = flows::list_obstacles(
            &fixture.db_connections,
            &AuthContext::anonymous(),
            AccessPolicy::Authenticated,
            Default::default(),
        )
        .unwrap_err();
        assert_eq!(ErrorKind::Unauthorized, err.kind());
    }

    #[test]
    fn filter_by_state() {
        let fixture = BackendFixture::new();
        fixture.create_obstacle("alice", usecases::SubmissionIntent::Draft);
        let pending = fixture.create_obstacle("alice", usecases::SubmissionIntent::Final);
        let summaries = flows::list_obstacles(
            &fixture.db_connections,
            &AuthContext::user("alice"),
            AccessPolicy::Authenticated,
            ObstacleQuery {
                state: Some(ObstacleState::Pending),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(1, summaries.len());
        assert_eq!(pending, summaries[0].id);
    }
}
