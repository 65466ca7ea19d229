use std::cell::RefCell;
use std::collections::{BTreeMap, LinkedList};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use clap::ValueEnum;
use structviz::{Config, Result, impl_visualize_record, to_dot_with};

/// Built-in sample structures the CLI can render.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Demo {
    Scalar,
    Vector,
    Pointers,
    Nested,
    Map,
    List,
    Record,
    Cycle,
    Shared,
}

impl Demo {
    pub fn name(self) -> &'static str {
        match self {
            Demo::Scalar => "scalar",
            Demo::Vector => "vector",
            Demo::Pointers => "pointers",
            Demo::Nested => "nested",
            Demo::Map => "map",
            Demo::List => "list",
            Demo::Record => "record",
            Demo::Cycle => "cycle",
            Demo::Shared => "shared",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Demo::Scalar => "a single integer",
            Demo::Vector => "a vector of integers drawn inline",
            Demo::Pointers => "boxed, missing and reference-counted pointers",
            Demo::Nested => "a vector of vectors joined by composition edges",
            Demo::Map => "an ordered map from names to scores",
            Demo::List => "a doubly linked list drawn as a chain",
            Demo::Record => "employees referring to their manager",
            Demo::Cycle => "two peers pointing at each other",
            Demo::Shared => "one allocation shared by several owners",
        }
    }

    pub fn render(self, config: &Config) -> Result<String> {
        match self {
            Demo::Scalar => to_dot_with(&42_i32, config),
            Demo::Vector => to_dot_with(&vec![3, 1, 4, 1, 5, 9], config),
            Demo::Pointers => {
                let pointers = Pointers {
                    boxed: Box::new(7),
                    missing: None,
                    counted: Rc::new("counted".to_string()),
                };
                to_dot_with(&pointers, config)
            }
            Demo::Nested => to_dot_with(&vec![vec![1, 2], vec![], vec![3, 4, 5]], config),
            Demo::Map => {
                let scores: BTreeMap<String, Vec<u32>> = [
                    ("ada".to_string(), vec![90, 95]),
                    ("grace".to_string(), vec![88]),
                    ("linus".to_string(), Vec::new()),
                ]
                .into_iter()
                .collect();
                to_dot_with(&scores, config)
            }
            Demo::List => {
                let list: LinkedList<&str> = ["head", "middle", "tail"].into_iter().collect();
                to_dot_with(&list, config)
            }
            Demo::Record => {
                let manager = Rc::new(Employee {
                    name: "Grace".to_string(),
                    age: 45,
                    skills: vec!["compilers".to_string(), "leadership".to_string()],
                    manager: None,
                });
                let team = vec![
                    Employee {
                        name: "Ada".to_string(),
                        age: 36,
                        skills: vec!["analysis".to_string()],
                        manager: Some(manager.clone()),
                    },
                    Employee {
                        name: "Alan".to_string(),
                        age: 41,
                        skills: Vec::new(),
                        manager: Some(manager),
                    },
                ];
                to_dot_with(&team, config)
            }
            Demo::Cycle => {
                let left = Rc::new(Peer::new("left"));
                let right = Rc::new(Peer::new("right"));
                *left.partner.borrow_mut() = Rc::downgrade(&right);
                *right.partner.borrow_mut() = Rc::downgrade(&left);
                to_dot_with(&left, config)
            }
            Demo::Shared => {
                let counted = Rc::new(Employee {
                    name: "Shared".to_string(),
                    age: 1,
                    skills: Vec::new(),
                    manager: None,
                });
                let atomic = Arc::new(99_u64);
                let owners = (
                    vec![counted.clone(), counted.clone(), counted],
                    atomic.clone(),
                    Arc::downgrade(&atomic),
                );
                to_dot_with(&owners, config)
            }
        }
    }
}

struct Pointers {
    boxed: Box<i32>,
    missing: Option<Box<i32>>,
    counted: Rc<String>,
}

impl_visualize_record!(Pointers {
    boxed,
    missing,
    counted,
});

struct Employee {
    name: String,
    age: u32,
    skills: Vec<String>,
    manager: Option<Rc<Employee>>,
}

impl_visualize_record!(Employee {
    name,
    age,
    skills,
    manager,
});

struct Peer {
    name: String,
    partner: RefCell<Weak<Peer>>,
}

impl Peer {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            partner: RefCell::new(Weak::new()),
        }
    }
}

impl_visualize_record!(Peer { name, partner });
