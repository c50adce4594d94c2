//! Macros for reducing boilerplate when working across resource kinds
//!
//! Runtime code often holds a [`ResourceKind`](crate::core::resource::ResourceKind)
//! and needs to call something generic over the concrete resource type.

/// Run a block once with a type alias bound to the concrete resource type
///
/// # Example
/// ```rust,ignore
/// use station::prelude::*;
///
/// let kind: ResourceKind = "sales".parse()?;
/// let title = dispatch_resource!(kind, R => <R as Tabular>::report_title());
/// assert_eq!(title, "Sales Report");
/// ```
#[macro_export]
macro_rules! dispatch_resource {
    ($kind:expr, $alias:ident => $body:expr) => {
        match $kind {
            $crate::core::resource::ResourceKind::Appointment => {
                type $alias = $crate::entities::Appointment;
                $body
            }
            $crate::core::resource::ResourceKind::Employee => {
                type $alias = $crate::entities::Employee;
                $body
            }
            $crate::core::resource::ResourceKind::Product => {
                type $alias = $crate::entities::Product;
                $body
            }
            $crate::core::resource::ResourceKind::Salary => {
                type $alias = $crate::entities::Salary;
                $body
            }
            $crate::core::resource::ResourceKind::Sale => {
                type $alias = $crate::entities::Sale;
                $body
            }
            $crate::core::resource::ResourceKind::User => {
                type $alias = $crate::entities::User;
                $body
            }
            $crate::core::resource::ResourceKind::UtilityExpense => {
                type $alias = $crate::entities::UtilityExpense;
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::resource::{Resource, ResourceKind};
    use crate::report::tabular::Tabular;

    #[test]
    fn test_dispatch_binds_matching_type() {
        for kind in ResourceKind::ALL {
            let bound = dispatch_resource!(kind, R => <R as Resource>::KIND);
            assert_eq!(bound, kind);
        }
    }

    #[test]
    fn test_dispatch_evaluates_body() {
        let title = dispatch_resource!(ResourceKind::Sale, R => <R as Tabular>::report_title());
        assert_eq!(title, "Sales Report");
    }
}
