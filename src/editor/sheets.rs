//! Sheet-level operations.

use crate::error::Result;
use crate::types::Workbook;

/// Append a duplicate of `sheet_name` called `<sheet_name><suffix>`.
pub(crate) fn copy_sheet(workbook: &mut Workbook, sheet_name: &str, suffix: &str) -> Result<String> {
    Ok(workbook.duplicate_sheet(sheet_name, suffix)?.name.clone())
}

pub(crate) fn insert_sheet(workbook: &mut Workbook, sheet_name: &str) -> Result<String> {
    Ok(workbook.create_sheet(sheet_name)?.name.clone())
}

pub(crate) fn delete_sheet(workbook: &mut Workbook, sheet_name: &str) -> Result<String> {
    Ok(workbook.remove_sheet(sheet_name)?.name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::XltransformError;

    #[test]
    fn test_copy_sheet_name_taken() {
        let mut wb = Workbook::new();
        wb.create_sheet("Data").unwrap();
        assert_eq!(copy_sheet(&mut wb, "Data", "_copy").unwrap(), "Data_copy");
        let err = copy_sheet(&mut wb, "Data", "_copy").unwrap_err();
        assert!(matches!(err, XltransformError::SheetAlreadyExists(ref n) if n == "Data_copy"));
        assert_eq!(wb.sheet_names(), vec!["Data", "Data_copy"]);
    }

    #[test]
    fn test_delete_last_sheet() {
        let mut wb = Workbook::new();
        wb.create_sheet("Only").unwrap();
        delete_sheet(&mut wb, "Only").unwrap();
        assert!(wb.sheets.is_empty());
        let err = delete_sheet(&mut wb, "Only").unwrap_err();
        assert!(matches!(err, XltransformError::SheetNotFound(_)));
    }
}
