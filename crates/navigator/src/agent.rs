use anyhow::Result;
use futures::stream::BoxStream;

use crate::errors::{AgentError, AgentResult};
use crate::memory::ConversationMemory;
use crate::models::content::Content;
use crate::models::message::{Message, ToolRequest};
use crate::models::tool::{Tool, ToolCall};
use crate::providers::base::Provider;
use crate::systems::System;

/// Agent combines a model provider, the systems hosting its tools, and the
/// conversation store that threads turns together
pub struct Agent {
    systems: Vec<Box<dyn System>>,
    provider: Box<dyn Provider>,
    memory: ConversationMemory,
}

impl Agent {
    /// Create a new Agent with the specified provider and a fresh conversation store
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            systems: Vec::new(),
            provider,
            memory: ConversationMemory::new(),
        }
    }

    /// Add a system to the agent
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    /// The systems this agent can dispatch to
    pub fn systems(&self) -> &[Box<dyn System>] {
        &self.systems
    }

    /// Get all tools from all systems with proper system prefixing
    fn get_prefixed_tools(&self) -> Vec<Tool> {
        let mut tools = Vec::new();
        for system in &self.systems {
            for tool in system.tools() {
                tools.push(Tool::new(
                    format!("{}__{}", system.name(), tool.name),
                    &tool.description,
                    tool.input_schema.clone(),
                ));
            }
        }
        tools
    }

    /// Find the appropriate system for a tool call based on the prefixed name
    fn get_system_for_tool(&self, prefixed_name: &str) -> Option<&dyn System> {
        let parts: Vec<&str> = prefixed_name.split("__").collect();
        if parts.len() != 2 {
            return None;
        }
        let system_name = parts[0];
        self.systems
            .iter()
            .find(|sys| sys.name() == system_name)
            .map(|v| &**v)
    }

    /// Dispatch a single tool call to the appropriate system
    async fn dispatch_tool_call(
        &self,
        tool_call: AgentResult<ToolCall>,
    ) -> AgentResult<Vec<Content>> {
        let call = tool_call?;
        let system = self
            .get_system_for_tool(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        let tool_name = call
            .name
            .split("__")
            .nth(1)
            .ok_or_else(|| AgentError::Internal(call.name.clone()))?;
        let system_tool_call = ToolCall::new(tool_name, call.arguments);

        system.call(system_tool_call).await
    }

    /// Run one conversation turn on the given thread.
    ///
    /// The incoming messages are appended to the thread's history, then the
    /// loop alternates completions and tool dispatch until the model produces
    /// a message with no tool requests. Every produced message (assistant and
    /// tool responses alike) is recorded on the thread and yielded in order.
    pub async fn reply(
        &self,
        instructions: &str,
        messages: &[Message],
        thread_id: &str,
    ) -> Result<BoxStream<'_, Result<Message>>> {
        let tools = self.get_prefixed_tools();
        let instructions = instructions.to_string();
        let thread_id = thread_id.to_string();

        let mut conversation = self.memory.get(&thread_id);
        conversation.extend_from_slice(messages);
        self.memory.extend(&thread_id, messages);

        Ok(Box::pin(async_stream::try_stream! {
            loop {
                // Get completion from provider
                let (response, _usage) = self.provider.complete(
                    &instructions,
                    &conversation,
                    &tools,
                ).await?;

                conversation.push(response.clone());
                self.memory.push(&thread_id, response.clone());
                yield response.clone();

                // Collect any tool requests from the assistant's response
                let tool_requests: Vec<&ToolRequest> = response.content
                    .iter()
                    .filter_map(|content| content.as_tool_request())
                    .collect();

                if tool_requests.is_empty() {
                    // No more tool calls, end the reply loop
                    break;
                }

                // Dispatch them in parallel and wait until all are finished
                let futures: Vec<_> = tool_requests
                    .iter()
                    .map(|request| self.dispatch_tool_call(request.tool_call.clone()))
                    .collect();
                let outputs = futures::future::join_all(futures).await;

                // Combine the outputs into one tool response message, reusing the
                // original request ids
                let mut message_tool_response = Message::user();
                for (request, output) in tool_requests.iter().zip(outputs.into_iter()) {
                    message_tool_response = message_tool_response.with_tool_response(
                        request.id.clone(),
                        output,
                    );
                }

                conversation.push(message_tool_response.clone());
                self.memory.push(&thread_id, message_tool_response.clone());
                yield message_tool_response;
            }
        }))
    }
}
