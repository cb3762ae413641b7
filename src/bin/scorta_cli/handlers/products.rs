use scorta::Console;
use scorta_api_types::ProductPayload;

use crate::args::ProductsAction;
use crate::context::CliError;

pub async fn handle(console: &Console, action: ProductsAction) -> Result<(), CliError> {
    let products = console.products();
    match action {
        ProductsAction::List(args) => super::list(&products, &args).await,
        ProductsAction::Create {
            name,
            sku,
            category_id,
            unit_id,
            price,
            remark,
        } => {
            let payload = ProductPayload {
                name,
                sku,
                category_id,
                unit_id,
                price,
                remark,
            };
            super::create(&products, &payload).await
        }
        ProductsAction::Update {
            id,
            name,
            sku,
            category_id,
            unit_id,
            price,
            remark,
        } => {
            let payload = ProductPayload {
                name,
                sku,
                category_id,
                unit_id,
                price,
                remark,
            };
            super::update(&products, id, &payload).await
        }
        ProductsAction::Delete { id } => super::delete(&products, id).await,
    }
}
