//! Serial implementation of BSP operations

use crate::mesh::bsp::node::Node;
use crate::mesh::bsp::traits::{BspOps, MiddlePivot, PivotStrategy};
use crate::mesh::polygon::Polygon;
use std::collections::VecDeque;

/// Serial implementation of BSP operations
#[derive(Debug, Clone, Default)]
pub struct SerialBspOps<SP: PivotStrategy = MiddlePivot> {
    pivot_strategy: SP,
}

impl SerialBspOps<MiddlePivot> {
    pub const fn new() -> Self {
        Self {
            pivot_strategy: MiddlePivot,
        }
    }
}

impl<SP: PivotStrategy> SerialBspOps<SP> {
    pub const fn with_strategy(strategy: SP) -> Self {
        Self {
            pivot_strategy: strategy,
        }
    }
}

impl<SP: PivotStrategy> BspOps for SerialBspOps<SP> {
    fn invert(&self, node: &mut Node) {
        // Nodes are independent here, so visiting order does not matter.
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            current.polygons.iter_mut().for_each(Polygon::flip);
            if let Some(ref mut plane) = current.plane {
                plane.flip();
            }

            std::mem::swap(&mut current.front, &mut current.back);

            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    fn clip_polygons(&self, node: &Node, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut queue = VecDeque::from([(node, polygons)]);

        while let Some((current, polygons)) = queue.pop_front() {
            if polygons.is_empty() {
                continue;
            }

            // Empty leaf: nothing left to clip against
            let Some(plane) = current.plane.as_ref() else {
                result.extend(polygons);
                continue;
            };

            let mut front = Vec::with_capacity(polygons.len());
            let mut back = Vec::with_capacity(polygons.len());

            // Unlike `build`, coplanar pieces are not kept at this node;
            // they follow their orientation into front or back.
            for polygon in &polygons {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);
                front.extend(coplanar_front);
                front.extend(front_parts);
                back.extend(coplanar_back);
                back.extend(back_parts);
            }

            // Front space outside the tree is empty, so it survives
            match current.front.as_deref() {
                Some(front_node) => queue.push_back((front_node, front)),
                None => result.extend(front),
            }

            // Back space outside the tree is solid, so it is consumed
            if let Some(back_node) = current.back.as_deref() {
                queue.push_back((back_node, back));
            }
        }

        result
    }

    fn clip_to(&self, node: &mut Node, other: &Node) {
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            let polygons = std::mem::take(&mut current.polygons);
            current.polygons = self.clip_polygons(other, polygons);

            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    fn all_polygons(&self, node: &Node) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            result.extend_from_slice(&current.polygons);

            // back first so that front is popped first
            stack.extend(current.back.as_deref());
            stack.extend(current.front.as_deref());
        }

        result
    }

    fn build(&self, node: &mut Node, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }

        let mut queue = VecDeque::from([(node, polygons)]);

        while let Some((current, mut polygons)) = queue.pop_front() {
            let pivot = polygons.remove(self.pivot_strategy.pick_pivot(&polygons));

            let plane = current.plane.get_or_insert_with(|| pivot.plane.clone());
            current.polygons.push(pivot);

            let mut front = Vec::with_capacity(polygons.len() / 2);
            let mut back = Vec::with_capacity(polygons.len() / 2);

            for polygon in &polygons {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);
                current.polygons.extend(coplanar_front);
                current.polygons.extend(coplanar_back);
                front.extend(front_parts);
                back.extend(back_parts);
            }

            let Node {
                front: front_node,
                back: back_node,
                ..
            } = current;

            if !front.is_empty() {
                let child = front_node.get_or_insert_with(|| Box::new(Node::new()));
                queue.push_back((child.as_mut(), front));
            }
            if !back.is_empty() {
                let child = back_node.get_or_insert_with(|| Box::new(Node::new()));
                queue.push_back((child.as_mut(), back));
            }
        }
    }
}
