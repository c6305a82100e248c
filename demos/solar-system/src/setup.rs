/// Builds scene nodes, the transform hierarchy and the registry from the catalog.

use glam::Vec3;
use orrery_engine::{Collider, EngineContext, LocalTransform, Node, NodeId};

use crate::catalog::{BodyEntry, Catalog, CatalogError, OverlayEntry};
use crate::driver::{FrameDriver, SpinningOverlay};
use crate::registry::{Body, BodyId, BodyRegistry, RegistryError};

/// Bodies render as unit spheres scaled by their catalog scale.
const BODY_RADIUS: f32 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Load the embedded catalog and build a ready-to-run system: transforms
/// propagated and the camera at its reset pose.
pub fn build(ctx: &mut EngineContext) -> Result<FrameDriver, SetupError> {
    let catalog = Catalog::load()?;
    let (registry, overlays) = populate(&catalog, ctx)?;
    ctx.graph.propagate(&mut ctx.scene);

    let driver = FrameDriver::new(registry, overlays);
    driver.reset_camera(ctx);
    log::info!(
        "star system ready: {} bodies, {} nodes",
        driver.registry().len(),
        ctx.scene.len()
    );
    Ok(driver)
}

/// Spawn one node per body and overlay, wire the hierarchy and register
/// everything. Body ids follow catalog order.
pub fn populate(
    catalog: &Catalog,
    ctx: &mut EngineContext,
) -> Result<(BodyRegistry, Vec<SpinningOverlay>), RegistryError> {
    let mut registry = BodyRegistry::new();
    let mut overlays = Vec::new();
    let mut next_body = 0u32;

    for entry in &catalog.bodies {
        let id = BodyId(next_body);
        next_body += 1;
        let node = spawn_body(entry, None, ctx);
        registry.register(Body::new(id, node, entry.orbit.map(|o| o.to_orbit())), entry.descriptor.clone())?;

        for overlay in &entry.overlays {
            let overlay_node = spawn_overlay(entry, overlay, node, ctx);
            registry.register_overlay(overlay_node, id)?;
            if let OverlayEntry::Clouds { spin_step, .. } = *overlay {
                overlays.push(SpinningOverlay::new(overlay_node, spin_step));
            }
        }

        for satellite in &entry.satellites {
            let sat_id = BodyId(next_body);
            next_body += 1;
            let sat_node = spawn_body(satellite, Some(node), ctx);
            let body = Body::new(sat_id, sat_node, satellite.orbit.map(|o| o.to_orbit()));
            registry.register_satellite(id, body, satellite.descriptor.clone())?;
        }
    }

    Ok((registry, overlays))
}

fn spawn_body(entry: &BodyEntry, parent: Option<NodeId>, ctx: &mut EngineContext) -> NodeId {
    let id = ctx.next_id();
    let offset = entry
        .orbit
        .map(|o| o.to_orbit().position)
        .unwrap_or(Vec3::ZERO);

    ctx.scene.spawn(
        Node::new(id)
            .with_tag(entry.tag.as_str())
            .with_collider(Collider::Sphere { radius: BODY_RADIUS }),
    );
    ctx.graph.register_with(
        id,
        LocalTransform::new().with_offset(offset).with_uniform_scale(entry.scale),
    );
    if parent.is_some() {
        ctx.graph.set_parent(id, parent);
    }
    id
}

fn spawn_overlay(owner: &BodyEntry, overlay: &OverlayEntry, parent: NodeId, ctx: &mut EngineContext) -> NodeId {
    let id = ctx.next_id();
    let (suffix, collider, scale) = match *overlay {
        OverlayEntry::Clouds { scale, .. } => ("clouds", Collider::Sphere { radius: BODY_RADIUS }, scale),
        OverlayEntry::Ring { inner, outer } => ("ring", Collider::Ring { inner, outer }, 1.0),
    };

    ctx.scene.spawn(
        Node::new(id)
            .with_tag(format!("{}-{}", owner.tag, suffix))
            .with_collider(collider),
    );
    ctx.graph.register_with(id, LocalTransform::new().with_uniform_scale(scale));
    ctx.graph.set_parent(id, Some(parent));
    id
}
