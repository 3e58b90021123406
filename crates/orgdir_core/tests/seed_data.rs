use orgdir_core::db::open_db_in_memory;
use orgdir_core::{
    seed_demo_data, ActivityService, OrganizationService, SeedSummary, SqliteActivityRepository,
    SqliteBuildingRepository, SqliteOrganizationRepository,
};

#[test]
fn demo_data_obeys_hierarchy() {
    let conn = open_db_in_memory().unwrap();
    let summary = seed_demo_data(&conn).unwrap();
    assert_eq!(
        summary,
        SeedSummary {
            buildings: 5,
            activities: 10,
            organizations: 5,
            phones: 7,
        }
    );

    let activities = ActivityService::new(SqliteActivityRepository::try_new(&conn).unwrap());
    let all = activities.list_activities().unwrap();
    let food = all.iter().find(|a| a.name == "Food").unwrap();
    let cars = all.iter().find(|a| a.name == "Cars").unwrap();
    let services = all.iter().find(|a| a.name == "Services").unwrap();
    assert_eq!(all.iter().filter(|a| a.level == 3).count(), 2);

    let organizations = OrganizationService::new(
        SqliteOrganizationRepository::try_new(&conn).unwrap(),
        SqliteActivityRepository::try_new(&conn).unwrap(),
        SqliteBuildingRepository::try_new(&conn).unwrap(),
    );
    assert_eq!(
        organizations
            .list_organizations_in_hierarchy(food.id)
            .unwrap()
            .len(),
        3
    );
    assert_eq!(
        organizations
            .list_organizations_in_hierarchy(cars.id)
            .unwrap()
            .len(),
        2
    );
    assert!(organizations
        .list_organizations_in_hierarchy(services.id)
        .unwrap()
        .is_empty());
}
