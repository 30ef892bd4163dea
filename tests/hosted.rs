use std::cell::RefCell;
use std::rc::Rc;

use recycle_pool::*;

/// A toy host: entities are indices into a table of (template, parent) and
/// every state change is appended to a shared event log.
#[derive(Debug, Default)]
struct World {
    entities: RefCell<Vec<(u32, Option<String>)>>,
    events: Rc<RefCell<Vec<String>>>,
}

impl World {
    fn log(&self, event: String) {
        self.events.borrow_mut().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl Instantiate<usize> for World {
    type Container = String;

    fn instantiate(&self, template: &usize, parent: Option<&String>) -> usize {
        let mut entities = self.entities.borrow_mut();
        entities.push((*template as u32, parent.cloned()));
        let id = entities.len() - 1;
        self.log(format!("spawn {id}"));
        id
    }
}

impl SetEnabled<usize> for World {
    fn set_enabled(&self, item: &usize, enabled: bool) {
        self.log(format!("enabled {item} {enabled}"));
    }
}

impl SetActive<usize> for World {
    fn set_active(&self, item: &usize, active: bool) {
        self.log(format!("active {item} {active}"));
    }
}

#[test]
fn test_managed_handle_pool_toggles_enabled() {
    let world = Rc::new(World::default());
    let pool = ManagedHandlePoolBuilder::new(Rc::clone(&world))
        .default_value(7usize)
        .build();

    let first = pool.pull().unwrap();
    pool.toss(first);
    let again = pool.pull().unwrap();

    assert_eq!(first, again);
    assert_eq!(
        world.events(),
        ["spawn 0", "enabled 0 true", "enabled 0 false", "enabled 0 true"]
    );
}

#[test]
fn test_activation_pool_toggles_active() {
    let world = Rc::new(World::default());
    let pool = ActivationPoolBuilder::new(Rc::clone(&world))
        .default_value(1usize)
        .build();

    let a = pool.pull().unwrap();
    let b = pool.pull().unwrap();
    pool.toss_all_back().unwrap();

    assert_ne!(a, b);
    assert_eq!(
        world.events(),
        [
            "spawn 0",
            "active 0 true",
            "spawn 1",
            "active 1 true",
            "active 0 false",
            "active 1 false",
        ]
    );
}

#[test]
fn test_instantiates_under_parent() {
    let world = Rc::new(World::default());
    let pool = ManagedHandlePoolBuilder::new(Rc::clone(&world))
        .default_value(3usize)
        .parent(String::from("bullets"))
        .build();

    let id = pool.pull().unwrap();

    assert_eq!(
        world.entities.borrow()[id],
        (3, Some(String::from("bullets")))
    );
}

#[test]
fn test_each_pull_from_empty_pool_instantiates_new_item() {
    let world = Rc::new(World::default());
    let pool = ActivationPoolBuilder::new(Rc::clone(&world))
        .default_value(0usize)
        .toggle_state(false)
        .build();

    let mut items = Vec::new();
    pool.pull_many(3, &mut items).unwrap();

    assert_eq!(items, [0, 1, 2]);
    assert_eq!(world.entities.borrow().len(), 3);
}

#[test]
fn test_built_in_hook_runs_before_caller_hook() {
    let world = Rc::new(World::default());
    let on_pull = Rc::clone(&world.events);
    let on_toss = Rc::clone(&world.events);
    let pool = ManagedHandlePoolBuilder::new(Rc::clone(&world))
        .default_value(0usize)
        .on_pull(move |item| on_pull.borrow_mut().push(format!("caller pull {item}")))
        .on_toss(move |item| on_toss.borrow_mut().push(format!("caller toss {item}")))
        .build();

    let item = pool.pull().unwrap();
    pool.toss(item);

    assert_eq!(
        world.events(),
        [
            "spawn 0",
            "enabled 0 true",
            "caller pull 0",
            "enabled 0 false",
            "caller toss 0",
        ]
    );
}

#[test]
fn test_toggle_state_disabled_keeps_caller_hooks() {
    let world = Rc::new(World::default());
    let on_pull = Rc::clone(&world.events);
    let pool = ActivationPoolBuilder::new(Rc::clone(&world))
        .default_value(0usize)
        .toggle_state(false)
        .on_pull(move |item| on_pull.borrow_mut().push(format!("caller pull {item}")))
        .build();

    let item = pool.pull().unwrap();
    pool.toss(item);

    assert_eq!(world.events(), ["spawn 0", "caller pull 0"]);
}

#[test]
fn test_missing_template_is_precondition_violation() {
    let world = Rc::new(World::default());
    let pool = ManagedHandlePoolBuilder::<usize, _>::new(Rc::clone(&world)).build();

    assert!(!pool.has_default());
    assert_eq!(
        pool.pull(),
        Err(Error::PreconditionViolation {
            reason: "factory template not set"
        })
    );
    assert!(world.events().is_empty());
    assert!(pool.is_empty());
}

#[test]
fn test_missing_template_still_recycles() {
    let world = Rc::new(World::default());
    let pool = ActivationPoolBuilder::<usize, _>::new(Rc::clone(&world)).build();

    pool.toss(5);
    assert_eq!(pool.pull(), Ok(5));

    pool.set_default(0);
    assert_eq!(pool.pull(), Ok(0));
    assert_eq!(
        world.events(),
        ["active 5 false", "active 5 true", "spawn 0", "active 0 true"]
    );
}

#[test]
fn test_hosted_pool_without_tracking() {
    let world = Rc::new(World::default());
    let pool: HostedPool<usize, World> = ManagedHandlePoolBuilder::new(world)
        .default_value(0usize)
        .track_outstanding(false)
        .build();

    pool.pull().unwrap();
    assert!(matches!(
        pool.toss_all_back(),
        Err(Error::InvalidOperation { .. })
    ));
}
