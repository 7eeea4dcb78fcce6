// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fakes for unit tests: a flat DOM, view models with named methods, a call log.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::event::{DomEvent, NativeEvent};
use crate::types::{Action, ActionArgs, DataItem, DomLookup};

/// A tiny flat DOM: index = node id.
#[derive(Default)]
pub(crate) struct FakeDom {
    pub(crate) nodes: Vec<FakeNode>,
}

#[derive(Default)]
pub(crate) struct FakeNode {
    pub(crate) parent: Option<u32>,
    pub(crate) text: bool,
    pub(crate) disabled: bool,
    pub(crate) attrs: Vec<(String, String)>,
}

impl FakeDom {
    pub(crate) fn add(&mut self, parent: Option<u32>) -> u32 {
        self.nodes.push(FakeNode {
            parent,
            ..FakeNode::default()
        });
        #[allow(clippy::cast_possible_truncation, reason = "Test trees are tiny.")]
        let id = (self.nodes.len() - 1) as u32;
        id
    }

    pub(crate) fn add_text(&mut self, parent: u32) -> u32 {
        let id = self.add(Some(parent));
        self.nodes[id as usize].text = true;
        id
    }

    pub(crate) fn attr(&mut self, node: u32, name: &str, value: &str) {
        self.nodes[node as usize]
            .attrs
            .push((name.into(), value.into()));
    }

    pub(crate) fn disable(&mut self, node: u32) {
        self.nodes[node as usize].disabled = true;
    }
}

impl DomLookup<u32> for FakeDom {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        self.nodes[*node as usize].parent
    }

    fn is_element(&self, node: &u32) -> bool {
        !self.nodes[*node as usize].text
    }

    fn is_disabled(&self, node: &u32) -> bool {
        self.nodes[*node as usize].disabled
    }

    fn attribute(&self, node: &u32, name: &str) -> Option<&str> {
        self.nodes[*node as usize]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

pub(crate) type Ev = DomEvent<u32>;
pub(crate) type Act = Action<u32, Vm, Ev>;

/// A view model: a name plus named methods. Equality is by name.
#[derive(Clone)]
pub(crate) struct Vm(Rc<VmInner>);

struct VmInner {
    name: &'static str,
    methods: RefCell<Vec<(&'static str, Act)>>,
}

impl Vm {
    pub(crate) fn new(name: &'static str) -> Self {
        Self(Rc::new(VmInner {
            name,
            methods: RefCell::new(Vec::new()),
        }))
    }

    pub(crate) fn with_method(self, name: &'static str, action: Act) -> Self {
        self.0.methods.borrow_mut().push((name, action));
        self
    }

    pub(crate) fn name(&self) -> &'static str {
        self.0.name
    }
}

impl DataItem<u32, Ev> for Vm {
    fn method(&self, name: &str) -> Option<Act> {
        self.0
            .methods
            .borrow()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, a)| a.clone())
    }
}

impl PartialEq for Vm {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl fmt::Debug for Vm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vm").field(&self.0.name).finish()
    }
}

/// One recorded action call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Event {
        receiver: &'static str,
        data: &'static str,
    },
    Submit {
        receiver: &'static str,
        form: u32,
    },
}

/// Shared call log, plus the target of every native event an action saw.
#[derive(Clone, Default)]
pub(crate) struct Calls {
    log: Rc<RefCell<Vec<Call>>>,
    targets: Rc<RefCell<Vec<u32>>>,
}

impl Calls {
    /// An action that records its call and returns `ret`.
    pub(crate) fn recorder(&self, ret: bool) -> Act {
        let log = self.clone();
        Action::new(move |receiver: &Vm, args: ActionArgs<'_, u32, Vm, Ev>| {
            let call = match args {
                ActionArgs::Event { data, event } => {
                    log.targets.borrow_mut().push(event.target());
                    Call::Event {
                        receiver: receiver.name(),
                        data: data.name(),
                    }
                }
                ActionArgs::Submit { form } => Call::Submit {
                    receiver: receiver.name(),
                    form,
                },
            };
            log.log.borrow_mut().push(call);
            ret
        })
    }

    pub(crate) fn take(&self) -> Vec<Call> {
        core::mem::take(&mut *self.log.borrow_mut())
    }

    /// Targets of the native events passed to recorded actions, in call order.
    pub(crate) fn take_targets(&self) -> Vec<u32> {
        core::mem::take(&mut *self.targets.borrow_mut())
    }
}
