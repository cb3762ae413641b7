use scorta::Console;
use scorta_api_types::InventoryPayload;

use crate::args::InventoriesAction;
use crate::context::CliError;

pub async fn handle(console: &Console, action: InventoriesAction) -> Result<(), CliError> {
    let inventories = console.inventories();
    match action {
        InventoriesAction::List(args) => super::list(&inventories, &args).await,
        InventoriesAction::Create {
            product_id,
            warehouse,
            quantity,
        } => {
            let payload = InventoryPayload {
                product_id,
                warehouse,
                quantity,
            };
            super::create(&inventories, &payload).await
        }
        InventoriesAction::Update {
            id,
            product_id,
            warehouse,
            quantity,
        } => {
            let payload = InventoryPayload {
                product_id,
                warehouse,
                quantity,
            };
            super::update(&inventories, id, &payload).await
        }
        InventoriesAction::Delete { id } => super::delete(&inventories, id).await,
    }
}
