//! 探索ノードと探索木
//!
//! ノードはアリーナ（`SearchTree`）上に置き、`NodeId` で参照する。親への参照は
//! 所有しないインデックスなので循環参照にならない。子は親が排他的に所有し、
//! ルート変更（`reroot`）時には新ルートの部分木だけを残してアリーナを詰め直す。

use std::collections::{HashMap, VecDeque};

use smallvec::SmallVec;

use crate::position::GamePosition;
use crate::types::{Move, Value};

/// ノードID（アリーナ内のインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// キラー手（最大2手、古いものから置き換え）
#[derive(Debug, Clone, Default)]
pub struct KillerMoves {
    moves: SmallVec<[Move; 2]>,
}

impl KillerMoves {
    /// 保持する最大数
    pub const CAPACITY: usize = 2;

    /// カットオフを起こした手を記録する
    ///
    /// 既に記録済みの手は追加しない。満杯なら最も古い手を捨てる。
    pub fn push(&mut self, mv: Move) {
        if self.moves.contains(&mv) {
            return;
        }
        if self.moves.len() == Self::CAPACITY {
            self.moves.remove(0);
        }
        self.moves.push(mv);
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// 古い順
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}

/// 探索ノード
pub struct SearchNode<P> {
    position: P,
    parent: Option<NodeId>,
    parent_move: Option<Move>,
    children: Vec<NodeId>,
    expanded: bool,
    /// 採用値（赤視点）
    value: Option<Value>,
    /// 子が並べ替え済みか
    sorted: bool,
    killers: KillerMoves,
    /// 指し手 -> 累積 History スコア（カットオフごとに depth^2 加算）
    history: HashMap<Move, u32>,
}

impl<P> SearchNode<P> {
    fn new(position: P, parent: Option<NodeId>, parent_move: Option<Move>) -> Self {
        Self {
            position,
            parent,
            parent_move,
            children: Vec::new(),
            expanded: false,
            value: None,
            sorted: false,
            killers: KillerMoves::default(),
            history: HashMap::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> &P {
        &self.position
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// 親からこのノードに至った指し手（ルートでは直前の指し手、初期局面ならNone）
    #[inline]
    pub fn parent_move(&self) -> Option<Move> {
        self.parent_move
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// 展開済みで合法手がない
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.expanded && self.children.is_empty()
    }

    #[inline]
    pub fn value(&self) -> Option<Value> {
        self.value
    }

    #[inline]
    pub fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    #[inline]
    pub fn killers(&self) -> &KillerMoves {
        &self.killers
    }

    /// History スコア
    #[inline]
    pub fn history(&self, mv: Move) -> u32 {
        self.history.get(&mv).copied().unwrap_or(0)
    }

    /// カットオフを記録する（キラー手とHistoryの更新）
    pub fn record_cutoff(&mut self, mv: Move, depth: u32, update_history: bool) {
        self.killers.push(mv);
        if update_history {
            let entry = self.history.entry(mv).or_insert(0);
            *entry = entry.saturating_add(depth.saturating_mul(depth));
        }
    }
}

impl<P: GamePosition> SearchNode<P> {
    /// 合法手がない（未展開なら局面に問い合わせる）
    pub fn has_no_moves(&self) -> bool {
        if self.expanded {
            self.children.is_empty()
        } else {
            !self.position.has_legal_moves()
        }
    }
}

/// 探索木（ノードアリーナ）
pub struct SearchTree<P> {
    nodes: Vec<SearchNode<P>>,
    root: NodeId,
}

impl<P: GamePosition> SearchTree<P> {
    /// 局面をルートとする木を作成
    pub fn new(position: P) -> Self {
        Self {
            nodes: vec![SearchNode::new(position, None, None)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode<P> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<P> {
        &mut self.nodes[id.index()]
    }

    /// アリーナ上のノード数
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 子ノードを生成する
    ///
    /// 生成は1ノードにつき1回だけ。新たに生成した子の数を返す（展開済みなら0）。
    pub fn expand(&mut self, id: NodeId) -> usize {
        if self.nodes[id.index()].expanded {
            return 0;
        }
        let successors = self.nodes[id.index()].position.successors();
        let count = successors.len();
        let mut children = Vec::with_capacity(count);
        for (mv, position) in successors {
            let child = NodeId(self.nodes.len() as u32);
            self.nodes.push(SearchNode::new(position, Some(id), Some(mv)));
            children.push(child);
        }
        let node = &mut self.nodes[id.index()];
        node.children = children;
        node.expanded = true;
        count
    }

    /// 指し手に対応する子ノード
    pub fn child_by_move(&self, id: NodeId, mv: Move) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).parent_move == Some(mv))
    }

    /// 子の並びを置き換える（並べ替え済みフラグを立てる）
    pub(crate) fn set_child_order(&mut self, id: NodeId, order: Vec<NodeId>) {
        let node = &mut self.nodes[id.index()];
        debug_assert_eq!(node.children.len(), order.len());
        node.children = order;
        node.sorted = true;
    }

    /// 現在のルートから `id` までの指し手列
    pub fn line_to(&self, id: NodeId) -> Vec<Move> {
        let mut line = Vec::new();
        let mut cur = id;
        while cur != self.root {
            let node = self.node(cur);
            let (Some(parent), Some(mv)) = (node.parent, node.parent_move) else {
                break;
            };
            line.push(mv);
            cur = parent;
        }
        line.reverse();
        line
    }

    /// `new_root` を新しいルートにする
    ///
    /// 新ルートの部分木以外のノードは破棄され、IDは振り直される。
    /// 新ルートの親リンクは外すが、直前の指し手（`parent_move`）は残す。
    pub fn reroot(&mut self, new_root: NodeId) {
        let old_len = self.nodes.len();
        let mut remap = vec![u32::MAX; old_len];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([new_root]);
        while let Some(id) = queue.pop_front() {
            remap[id.index()] = order.len() as u32;
            order.push(id);
            queue.extend(self.nodes[id.index()].children.iter().copied());
        }

        let mut slots: Vec<Option<SearchNode<P>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for id in order {
            let Some(mut node) = slots[id.index()].take() else {
                continue;
            };
            node.parent = node
                .parent
                .map(|p| remap[p.index()])
                .filter(|&p| p != u32::MAX)
                .map(NodeId);
            for child in node.children.iter_mut() {
                *child = NodeId(remap[child.index()]);
            }
            nodes.push(node);
        }
        self.nodes = nodes;
        self.root = NodeId(0);
    }
}
