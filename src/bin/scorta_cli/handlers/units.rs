use scorta::Console;
use scorta_api_types::MeasureUnitPayload;

use crate::args::UnitsAction;
use crate::context::CliError;

pub async fn handle(console: &Console, action: UnitsAction) -> Result<(), CliError> {
    let units = console.measure_units();
    match action {
        UnitsAction::List(args) => super::list(&units, &args).await,
        UnitsAction::Create { name, abbreviation } => {
            let payload = MeasureUnitPayload { name, abbreviation };
            super::create(&units, &payload).await
        }
        UnitsAction::Update {
            id,
            name,
            abbreviation,
        } => {
            let payload = MeasureUnitPayload { name, abbreviation };
            super::update(&units, id, &payload).await
        }
        UnitsAction::Delete { id } => super::delete(&units, id).await,
    }
}
