use crate::api::AppError;
use crate::catalog::service::CatalogService;
use crate::config::model::SelectedTestCase;
use crate::matrix::model::{MatrixCell, MatrixRow, TestMatrix};

/// Derive the execution matrix from the current selection: app columns in
/// first-seen order, one row per selected test case.
pub fn build_matrix(selection: &[SelectedTestCase], catalog: &CatalogService) -> TestMatrix {
    let mut apps: Vec<String> = vec![];
    for selected in selection {
        for app in &selected.selected_apps {
            if !apps.iter().any(|a| a == app) {
                apps.push(app.clone());
            }
        }
    }

    let rows = selection
        .iter()
        .map(|selected| MatrixRow {
            test_case_id: selected.test_case_id.clone(),
            test_case_name: catalog
                .test_case(&selected.test_case_id)
                .map(|case| case.name.clone())
                .unwrap_or_else(|| selected.test_case_id.clone()),
            cells: apps
                .iter()
                .map(|app| match selected.user_ids.get(app) {
                    Some(user_id) => MatrixCell::Editable {
                        user_id: user_id.clone(),
                    },
                    None => MatrixCell::NotApplicable,
                })
                .collect(),
        })
        .collect();

    TestMatrix { apps, rows }
}

/// Overwrite the user id of one `(test case, app)` cell. Only existing
/// entries may be edited; an app outside the case's selected set is a
/// validation error, so an entry is never created for it.
pub fn set_user_id(
    selection: &mut [SelectedTestCase],
    test_case_id: &str,
    app_id: &str,
    user_id: &str,
) -> Result<(), AppError> {
    let selected = selection
        .iter_mut()
        .find(|s| s.test_case_id == test_case_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Test case {} is not selected", test_case_id))
        })?;

    if !selected.selected_apps.iter().any(|a| a == app_id) {
        return Err(AppError::Validation(format!(
            "App {} is not selected for test case {}",
            app_id, test_case_id
        )));
    }
    selected
        .user_ids
        .insert(app_id.to_string(), user_id.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SequenceIdentityGenerator;
    use crate::suite::model::SuiteSelection;

    fn selection_for(suite_id: &str, catalog: &CatalogService) -> Vec<SelectedTestCase> {
        let ids = SequenceIdentityGenerator::new();
        let suite = catalog.premade_suite(suite_id).unwrap();
        SuiteSelection::premade(suite, &ids).selected
    }

    #[test]
    fn app_columns_appear_in_first_seen_order() {
        let catalog = CatalogService::new();
        let selection = selection_for("25.10_BalGen", &catalog);
        let matrix = build_matrix(&selection, &catalog);

        // auth-001 contributes the first three, auth-003 the remaining two
        assert_eq!(
            matrix.apps,
            vec![
                "mobile-app",
                "web-app",
                "tablet-app",
                "desktop-app",
                "admin-portal"
            ]
        );
        assert_eq!(matrix.rows.len(), 5);
    }

    #[test]
    fn unsupported_cells_are_explicitly_not_applicable() {
        let catalog = CatalogService::new();
        let selection = selection_for("25.10_BalGen", &catalog);
        let matrix = build_matrix(&selection, &catalog);

        // auth-002 supports mobile-app and web-app only
        let row = matrix
            .rows
            .iter()
            .find(|row| row.test_case_id == "auth-002")
            .unwrap();
        assert_eq!(row.test_case_name, "Password Reset");
        assert!(matches!(row.cells[0], MatrixCell::Editable { .. }));
        assert!(matches!(row.cells[1], MatrixCell::Editable { .. }));
        assert_eq!(row.cells[2], MatrixCell::NotApplicable);
        assert_eq!(row.cells[3], MatrixCell::NotApplicable);
    }

    #[test]
    fn editing_a_cell_touches_only_that_entry() {
        let catalog = CatalogService::new();
        let mut selection = selection_for("25.10_BalGen", &catalog);

        set_user_id(&mut selection, "auth-001", "web-app", "qa_alice").unwrap();

        let edited = selection
            .iter()
            .find(|s| s.test_case_id == "auth-001")
            .unwrap();
        assert_eq!(edited.user_ids["web-app"], "qa_alice");
        assert_eq!(edited.user_ids["mobile-app"], "user_000001");
    }

    #[test]
    fn editing_an_unselected_app_never_creates_an_entry() {
        let catalog = CatalogService::new();
        let mut selection = selection_for("25.10_BalGen", &catalog);

        let result = set_user_id(&mut selection, "auth-002", "admin-portal", "qa_bob");
        assert!(matches!(result, Err(AppError::Validation(_))));

        let untouched = selection
            .iter()
            .find(|s| s.test_case_id == "auth-002")
            .unwrap();
        assert!(!untouched.user_ids.contains_key("admin-portal"));
    }

    #[test]
    fn editing_an_unknown_case_is_not_found() {
        let catalog = CatalogService::new();
        let mut selection = selection_for("25.10_BalGen", &catalog);
        let result = set_user_id(&mut selection, "ghost-999", "web-app", "qa_eve");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
