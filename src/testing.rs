// Test helpers: a transport that replays canned responses and records
// every request it was asked to send.

use crate::api::{ApiRequest, ApiResponse, Transport};
use crate::error::CourierResult;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub type RequestLog = Rc<RefCell<Vec<ApiRequest>>>;

pub struct ScriptedTransport {
    responses: RefCell<VecDeque<ApiResponse>>,
    log: RequestLog,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResponse>) -> Self {
        ScriptedTransport {
            responses: RefCell::new(responses.into()),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Shared handle on the requests sent so far.
    pub fn log(&self) -> RequestLog {
        Rc::clone(&self.log)
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> CourierResult<ApiResponse> {
        self.log.borrow_mut().push(request);
        let next = self.responses.borrow_mut().pop_front();
        Ok(next.unwrap_or_else(|| panic!("no scripted response left")))
    }
}
