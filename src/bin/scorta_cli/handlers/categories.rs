use scorta::Console;
use scorta_api_types::CategoryPayload;

use crate::args::CategoriesAction;
use crate::context::CliError;

pub async fn handle(console: &Console, action: CategoriesAction) -> Result<(), CliError> {
    let categories = console.categories();
    match action {
        CategoriesAction::List(args) => super::list(&categories, &args).await,
        CategoriesAction::Create { name, remark } => {
            let payload = CategoryPayload { name, remark };
            super::create(&categories, &payload).await
        }
        CategoriesAction::Update { id, name, remark } => {
            let payload = CategoryPayload { name, remark };
            super::update(&categories, id, &payload).await
        }
        CategoriesAction::Delete { id } => super::delete(&categories, id).await,
    }
}
