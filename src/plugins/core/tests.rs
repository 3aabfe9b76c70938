use bevy::prelude::*;
use crate::plugins::core;
use crate::common::tunables::Tunables;

#[test]
fn inserts_tunables() {
    let mut app = App::new();
    core::plugin(&mut app);
    let t = app.world().get_resource::<Tunables>().expect("Tunables missing");
    assert_eq!(t.cell_size, 64.0);
}

#[test]
fn keeps_tunables_inserted_by_the_host() {
    let mut app = App::new();
    app.insert_resource(Tunables { cell_size: 128.0, ..Tunables::default() });
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().cell_size, 128.0);
}
