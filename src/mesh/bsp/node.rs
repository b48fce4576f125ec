//! BSP tree node data structure

use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;

/// A BSP tree node, containing polygons plus optional front/back subtrees
///
/// Each node exclusively owns its children. `Clone` and `Drop` walk the tree
/// with explicit stacks, so arbitrarily deep (degenerate, list-like) trees
/// never exhaust the call stack.
#[derive(Debug)]
pub struct Node {
    /// Splitting plane for this node *or* **None** for a leaf that
    /// only stores polygons.
    pub plane: Option<Plane>,

    /// Polygons in *front* half‑spaces.
    pub front: Option<Box<Node>>,

    /// Polygons in *back* half‑spaces.
    pub back: Option<Box<Node>>,

    /// Polygons that lie on `plane` (after the node has been built).
    pub polygons: Vec<Polygon>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// A copy of this node's own plane and polygons, without children.
    fn shallow_clone(&self) -> Self {
        Self {
            plane: self.plane.clone(),
            front: None,
            back: None,
            polygons: self.polygons.clone(),
        }
    }

    /// Number of nodes in the tree rooted here.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend(current.front.as_deref());
            stack.extend(current.back.as_deref());
        }
        count
    }

    /// Length of the longest root-to-node path, counting nodes (a lone root has depth 1).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((current, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(current.front.as_deref().map(|n| (n, depth + 1)));
            stack.extend(current.back.as_deref().map(|n| (n, depth + 1)));
        }
        deepest
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        let mut root = self.shallow_clone();
        let mut stack: Vec<(&Node, &mut Node)> = vec![(self, &mut root)];

        while let Some((original, copy)) = stack.pop() {
            let Node { front, back, .. } = copy;
            if let Some(original_front) = original.front.as_deref() {
                let child: &mut Node = front.insert(Box::new(original_front.shallow_clone()));
                stack.push((original_front, child));
            }
            if let Some(original_back) = original.back.as_deref() {
                let child: &mut Node = back.insert(Box::new(original_back.shallow_clone()));
                stack.push((original_back, child));
            }
        }

        root
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        // Each popped node is dropped childless at the end of the iteration.
        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}
