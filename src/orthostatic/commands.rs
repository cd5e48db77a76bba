use crate::{
    orthostatic::{OrthostaticController, OrthostaticOutcome, OrthostaticState},
    AppState,
};

fn controller_from_state(state: &AppState) -> OrthostaticController {
    state.orthostatic.clone()
}

pub async fn get_orthostatic_state(state: &AppState) -> Result<OrthostaticState, String> {
    let controller = controller_from_state(state);
    Ok(controller.get_state().await)
}

pub async fn start_orthostatic_test(state: &AppState) -> Result<OrthostaticState, String> {
    let controller = controller_from_state(state);
    Ok(controller.start_test().await)
}

pub async fn submit_lying_heart_rate(
    state: &AppState,
    heart_rate: &str,
) -> Result<OrthostaticState, String> {
    let controller = controller_from_state(state);
    controller
        .submit_lying(heart_rate)
        .await
        .map_err(|e| e.to_string())
}

pub async fn submit_standing_heart_rate(
    state: &AppState,
    heart_rate: &str,
) -> Result<OrthostaticOutcome, String> {
    let controller = controller_from_state(state);
    let threshold = state.settings.current().pots_threshold_bpm;
    controller
        .submit_standing(heart_rate, threshold)
        .await
        .map_err(|e| e.to_string())
}
