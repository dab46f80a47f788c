use flow_sg::{
    Affine, CompileConfig, CompiledScene, GeometryHandle, MaterialId, Node, NodeKind, Pose,
    TransferFunctionHandle, Value, VolumeHandle, cgmath::Vector3, compile,
    data_structures::node::{MATERIAL_CHILD, TRANSFER_FUNCTION_CHILD},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn translation(x: f32, y: f32, z: f32) -> Affine {
    Pose::from(Vector3::new(x, y, z)).to_matrix()
}

pub fn compile_default(root: &Node) -> CompiledScene {
    init_logger();
    match compile(root, &CompileConfig::default()) {
        Ok(compiled) => compiled,
        Err(e) => panic!("compilation failed: {e}"),
    }
}

pub fn geometry_with_material(name: &str, geometry: u32, material: u32) -> Node {
    Node::geometry(name, GeometryHandle(geometry)).with_child(Node::param(
        MATERIAL_CHILD,
        Value::Material(MaterialId(material)),
    ))
}

pub fn volume_with_tfn(name: &str, volume: u32, tfn: u32) -> Node {
    Node::volume(name, VolumeHandle(volume)).with_child(Node::param(
        TRANSFER_FUNCTION_CHILD,
        Value::TransferFunction(TransferFunctionHandle(tfn)),
    ))
}

pub fn group(name: &str) -> Node {
    Node::new(name, NodeKind::Other)
}

/// Geometry handles of every instance, in instance order.
pub fn geometry_ids(compiled: &CompiledScene) -> Vec<Vec<u32>> {
    compiled
        .world
        .instances()
        .iter()
        .map(|inst| {
            inst.group()
                .geometries()
                .iter()
                .map(|model| model.geometry.id())
                .collect()
        })
        .collect()
}

/// Deterministic scene with `breadth` children per level and `depth` levels,
/// alternating transforms, material scopes and leaves.
pub fn generated_scene(depth: usize, breadth: usize) -> Node {
    fn level(prefix: &str, depth: usize, breadth: usize, counter: &mut u32) -> Vec<Node> {
        (0..breadth)
            .map(|i| {
                *counter += 1;
                let id = *counter;
                let name = format!("{prefix}{i}");
                if depth == 0 {
                    return if id % 3 == 0 {
                        volume_with_tfn(&name, id, id)
                    } else {
                        Node::geometry(&name, GeometryHandle(id))
                    };
                }
                let children = level(&format!("{name}."), depth - 1, breadth, counter);
                match id % 3 {
                    0 => Node::transform(&name, translation(id as f32, 0.0, 0.0))
                        .with_children(children),
                    1 => Node::material_reference(&name, MaterialId(id)).with_children(children),
                    _ => group(&name)
                        .with_child(Node::geometry(format!("{name}.leaf"), GeometryHandle(id)))
                        .with_children(children),
                }
            })
            .collect()
    }
    let mut counter = 0;
    Node::world("generated").with_child(
        Node::material_reference("base", MaterialId(0)).with_children(level(
            "n",
            depth,
            breadth,
            &mut counter,
        )),
    )
}
