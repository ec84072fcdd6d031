//! Read-only computations over an already fetched employee list.

use crate::models::Employee;

/// Number of names returned by the top earners query.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `term`, ignoring case, in input order.
///
/// An empty term matches everyone.
pub fn search(employees: &[Employee], term: &str) -> Vec<Employee> {
    let needle = term.to_lowercase();
    employees
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Highest salary in the list, or 0 when the list is empty.
pub fn max_salary(employees: &[Employee]) -> i32 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

/// Names of the `n` best paid employees, highest salary first.
///
/// Equal salaries keep their input order. Returns fewer than `n` names when
/// the list is shorter.
pub fn top_earners(employees: &[Employee], n: usize) -> Vec<String> {
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.salary.cmp(&a.salary));
    ranked.into_iter().take(n).map(|e| e.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: &str, salary: i32) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            salary,
            age: 30,
            title: "Engineer".to_string(),
            email: None,
        }
    }

    fn staff() -> Vec<Employee> {
        vec![
            employee("1", "John Doe", 100000),
            employee("2", "Jane Smith", 120000),
            employee("3", "Alice Johnson", 90000),
            employee("4", "Bob Brown", 110000),
        ]
    }

    #[test]
    fn test_search_case_insensitive() {
        let result = search(&staff(), "JANE");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Jane Smith");
        assert_eq!(result[0].salary, 120000);
    }

    #[test]
    fn test_search_preserves_order() {
        let names: Vec<String> = search(&staff(), "jo").into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["John Doe", "Alice Johnson"]);
    }

    #[test]
    fn test_search_empty_term_matches_all() {
        assert_eq!(search(&staff(), ""), staff());
    }

    #[test]
    fn test_search_no_match() {
        assert!(search(&staff(), "zed").is_empty());
        assert!(search(&[], "jane").is_empty());
    }

    #[test]
    fn test_max_salary() {
        assert_eq!(max_salary(&staff()), 120000);
        assert_eq!(max_salary(&[]), 0);
    }

    #[test]
    fn test_top_earners_ordering() {
        let names = top_earners(&staff(), TOP_EARNERS_LIMIT);
        assert_eq!(names, vec!["Jane Smith", "Bob Brown", "John Doe", "Alice Johnson"]);
    }

    #[test]
    fn test_top_earners_truncates() {
        let names = top_earners(&staff(), 2);
        assert_eq!(names, vec!["Jane Smith", "Bob Brown"]);
        assert!(top_earners(&staff(), 0).is_empty());
    }

    #[test]
    fn test_top_earners_stable_on_ties() {
        let employees = vec![
            employee("1", "First", 500),
            employee("2", "Second", 900),
            employee("3", "Third", 500),
            employee("4", "Fourth", 500),
        ];
        let names = top_earners(&employees, 10);
        assert_eq!(names, vec!["Second", "First", "Third", "Fourth"]);
    }

    #[test]
    fn test_top_earners_limit_on_large_input() {
        let employees: Vec<Employee> = (1..=25)
            .map(|i| employee(&i.to_string(), &format!("Employee {i}"), i * 1000))
            .collect();
        let names = top_earners(&employees, TOP_EARNERS_LIMIT);

        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "Employee 25");
        assert_eq!(names[9], "Employee 16");
    }
}
