use anyhow::{bail, Result};
use mongodb::bson::doc;
use futures::stream::TryStreamExt;
use slug::slugify;

use crate::models::Client;

use super::AppState;

/// Fields accepted by the create/update forms. Every field except the name
/// is optional and defaults to empty.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub pan: String,
    #[serde(default)]
    pub gst: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
}

pub async fn list_clients(state: &AppState) -> Result<Vec<Client>> {
    let mut cursor = state.clients.find(doc! {}).sort(doc! { "name": 1 }).await?;
    let mut items = Vec::new();
    while let Some(client) = cursor.try_next().await? {
        items.push(client);
    }
    Ok(items)
}

pub async fn get_client(state: &AppState, client_id: &str) -> Result<Option<Client>> {
    state
        .clients
        .find_one(doc! { "_id": client_id })
        .await
        .map_err(Into::into)
}

/// Creates a client with a slug id derived from the name. The id is
/// immutable for the life of the client.
pub async fn create_client(state: &AppState, input: ClientInput) -> Result<Client> {
    let id = slugify(input.name.trim());
    if id.is_empty() {
        bail!("client name is required");
    }
    if get_client(state, &id).await?.is_some() {
        bail!("client '{id}' already exists");
    }

    let client = Client {
        id,
        name: input.name.trim().to_string(),
        business_name: input.business_name,
        pan: input.pan,
        gst: input.gst,
        email: input.email,
        phone: input.phone,
        whatsapp: input.whatsapp,
        address: input.address,
        city: input.city,
        state: input.state,
        pincode: input.pincode,
    };
    state.clients.insert_one(client.clone()).await?;
    Ok(client)
}

/// Merge-update: empty input fields keep the stored value. The id never
/// changes.
pub async fn update_client(state: &AppState, client_id: &str, input: ClientInput) -> Result<Option<Client>> {
    let Some(existing) = get_client(state, client_id).await? else {
        return Ok(None);
    };

    let pick = |incoming: String, current: String| {
        if incoming.trim().is_empty() {
            current
        } else {
            incoming
        }
    };

    let updated = Client {
        id: existing.id.clone(),
        name: pick(input.name, existing.name),
        business_name: pick(input.business_name, existing.business_name),
        pan: pick(input.pan, existing.pan),
        gst: pick(input.gst, existing.gst),
        email: pick(input.email, existing.email),
        phone: pick(input.phone, existing.phone),
        whatsapp: pick(input.whatsapp, existing.whatsapp),
        address: pick(input.address, existing.address),
        city: pick(input.city, existing.city),
        state: pick(input.state, existing.state),
        pincode: pick(input.pincode, existing.pincode),
    };

    state
        .clients
        .replace_one(doc! { "_id": client_id }, updated.clone())
        .await?;
    Ok(Some(updated))
}

/// Deletes a client and every statement stored for it across all fiscal
/// years. The cascade is required behavior, not optional cleanup.
pub async fn delete_client_cascade(state: &AppState, client_id: &str) -> Result<()> {
    state
        .balance_sheets
        .delete_many(doc! { "clientId": client_id })
        .await?;
    state
        .profit_loss
        .delete_many(doc! { "clientId": client_id })
        .await?;
    state.clients.delete_one(doc! { "_id": client_id }).await?;
    Ok(())
}

/// Removes all clients and all of their statements. Returns how many
/// clients were deleted.
pub async fn reset_all(state: &AppState) -> Result<u64> {
    let count = state.clients.count_documents(doc! {}).await?;
    state.balance_sheets.delete_many(doc! {}).await?;
    state.profit_loss.delete_many(doc! {}).await?;
    state.clients.delete_many(doc! {}).await?;
    Ok(count)
}
