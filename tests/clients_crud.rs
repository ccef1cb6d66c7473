use ledgerbook::models::{BalanceSheet, ProfitAndLoss};
use ledgerbook::state::{
    ClientInput, create_client, delete_client_cascade, get_balance_sheet, get_client,
    get_profit_loss, list_clients, reset_all, save_balance_sheet, save_profit_loss, update_client,
};

#[path = "common/mod.rs"]
mod common;

fn input(name: &str) -> ClientInput {
    ClientInput {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn clients_crud_works() {
    let ctx = match common::setup_state().await {
        Some(s) => s,
        None => return,
    };
    let state = ctx.state.clone();

    let created = create_client(&state, input("Ravi Traders")).await.unwrap();
    assert_eq!(created.id, "ravi-traders");
    assert_eq!(created.name, "Ravi Traders");

    // slug ids are unique
    assert!(create_client(&state, input("Ravi Traders")).await.is_err());
    // a name is required
    assert!(create_client(&state, input("   ")).await.is_err());

    let fetched = get_client(&state, "ravi-traders").await.unwrap().unwrap();
    assert_eq!(fetched.name, "Ravi Traders");

    let mut edit = input("");
    edit.city = "Pune".to_string();
    let updated = update_client(&state, "ravi-traders", edit)
        .await
        .unwrap()
        .unwrap();
    // empty fields keep their stored values; the id never changes
    assert_eq!(updated.id, "ravi-traders");
    assert_eq!(updated.name, "Ravi Traders");
    assert_eq!(updated.city, "Pune");

    create_client(&state, input("Anand Stores")).await.unwrap();
    let names: Vec<String> = list_clients(&state)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Anand Stores", "Ravi Traders"]);

    common::teardown(Some(ctx)).await;
}

#[tokio::test]
async fn deleting_a_client_cascades_to_all_statements() {
    let ctx = match common::setup_state().await {
        Some(s) => s,
        None => return,
    };
    let state = ctx.state.clone();

    create_client(&state, input("Ravi Traders")).await.unwrap();
    for year in ["2022-2023", "2023-2024"] {
        save_balance_sheet(&state, "ravi-traders", year, &BalanceSheet::default())
            .await
            .unwrap();
        save_profit_loss(&state, "ravi-traders", year, &ProfitAndLoss::default())
            .await
            .unwrap();
    }

    delete_client_cascade(&state, "ravi-traders").await.unwrap();

    assert!(get_client(&state, "ravi-traders").await.unwrap().is_none());
    for year in ["2022-2023", "2023-2024"] {
        assert!(
            get_balance_sheet(&state, "ravi-traders", year)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            get_profit_loss(&state, "ravi-traders", year)
                .await
                .unwrap()
                .is_none()
        );
    }

    common::teardown(Some(ctx)).await;
}

#[tokio::test]
async fn reset_wipes_everything_and_reports_the_count() {
    let ctx = match common::setup_state().await {
        Some(s) => s,
        None => return,
    };
    let state = ctx.state.clone();

    create_client(&state, input("Ravi Traders")).await.unwrap();
    create_client(&state, input("Anand Stores")).await.unwrap();
    save_balance_sheet(&state, "ravi-traders", "2023-2024", &BalanceSheet::default())
        .await
        .unwrap();

    let removed = reset_all(&state).await.unwrap();
    assert_eq!(removed, 2);
    assert!(list_clients(&state).await.unwrap().is_empty());
    assert!(
        get_balance_sheet(&state, "ravi-traders", "2023-2024")
            .await
            .unwrap()
            .is_none()
    );

    common::teardown(Some(ctx)).await;
}
