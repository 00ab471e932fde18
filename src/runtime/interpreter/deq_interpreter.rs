use std::{ io::Write,
           rc::Rc };
use log::{ debug,
           trace };
use crate::{ lang::{ code::{ decode,
                             parse_literal,
                             Instruction },
                     program::Program,
                     source_buffer::SourceLocation },
             runtime::{ built_ins::register_base_words,
                        data_structures::{ deq::{ Deq,
                                                  Direction },
                                           dictionary::{ Dictionary,
                                                         WordInfo },
                                           value::{ Data,
                                                    Value } },
                        error::{ self,
                                 script_error,
                                 script_error_str,
                                 ErrorKind },
                        interpreter::{ integer_of,
                                       CallFrame,
                                       CallStack,
                                       Config,
                                       FlowControl,
                                       Interpreter,
                                       InterpreterDeq,
                                       Outcome,
                                       WordHandler,
                                       WordManagement } } };



/// Where the instruction pointer goes once the current instruction finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow
{
    Advance,
    Jump(usize),
    Exit
}



/// The core interpreter for the deq language.  Owns all of the run-time state of one program:
/// the deq, the call stack and the inversion flag.  Program output is written to `W`, standard
/// output for the command line tool and a byte buffer in tests.
pub struct DeqInterpreter<W: Write>
{
    /// The program being executed, shared so that the dispatch loop can hold on to the current
    /// token while words mutate the interpreter.
    program: Rc<Program>,

    config: Config,

    /// The operation words known by the interpreter.
    dictionary: Dictionary,

    deq: Deq,

    call_stack: CallStack,

    /// Flips the effective direction of every push and pop while set.
    inverted: bool,

    /// Index of the token being executed.
    index: usize,

    /// Direction marker of the instruction being executed.
    literal: Direction,

    flow: Flow,

    /// Number of tokens dispatched so far.
    steps: u64,

    output: W
}


impl<W: Write> InterpreterDeq for DeqInterpreter<W>
{
    fn deq(&self) -> &Deq
    {
        &self.deq
    }

    fn direction(&self) -> Direction
    {
        self.literal.inverted_if(self.inverted)
    }

    fn push(&mut self, data: Data)
    {
        let value = Value::new(self.index, data);
        self.push_value(value);
    }

    fn push_value(&mut self, value: Value)
    {
        let direction = self.direction();
        self.deq.push(direction, value);
    }

    fn push_value_to(&mut self, direction: Direction, value: Value)
    {
        self.deq.push(direction, value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        let direction = self.direction();

        match self.deq.pop(direction)
        {
            Some(value) => Ok(value),
            None => self.underflow(1)
        }
    }

    fn pop_as_int(&mut self) -> error::Result<i64>
    {
        let value = self.pop()?;
        integer_of(self, &value)
    }

    fn expect(&self, count: usize) -> error::Result<()>
    {
        if !self.deq.has_at_least(count)
        {
            return self.underflow(count);
        }

        Ok(())
    }
}


impl<W: Write> FlowControl for DeqInterpreter<W>
{
    fn current_index(&self) -> usize
    {
        self.index
    }

    fn literal_direction(&self) -> Direction
    {
        self.literal
    }

    fn jump(&mut self, target: i64)
    {
        // A negative target can never be reached, treat it like any other target past the end.
        let target = usize::try_from(target).unwrap_or(usize::MAX);

        self.flow = Flow::Jump(target);
    }

    fn call(&mut self, target: i64)
    {
        let location = self.current_location().unwrap_or_default();

        debug!("call from token {} to {}", self.index, target);

        self.call_stack.push(CallFrame::new(self.index, self.literal, location));
        self.jump(target);
    }

    fn ret(&mut self) -> error::Result<()>
    {
        match self.call_stack.pop()
        {
            Some(frame) =>
                {
                    debug!("return from token {} to {}", self.index, frame.return_index() + 1);
                    self.flow = Flow::Jump(frame.return_index() + 1);
                    Ok(())
                },

            None => script_error_str(self, ErrorKind::CallStack, "call stack is empty")
        }
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }

    fn is_inverted(&self) -> bool
    {
        self.inverted
    }

    fn set_inverted(&mut self, inverted: bool)
    {
        if inverted != self.inverted
        {
            debug!("deq inversion {} at token {}", if inverted { "on" } else { "off" }, self.index);
        }

        self.inverted = inverted;
    }

    fn exit(&mut self)
    {
        self.flow = Flow::Exit;
    }
}


impl<W: Write> WordManagement for DeqInterpreter<W>
{
    fn add_word(&mut self,
                name: String,
                handler: Rc<WordHandler>,
                description: String,
                signature: String)
    {
        self.dictionary.insert(WordInfo { name, description, signature, handler });
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }
}


impl<W: Write> Interpreter for DeqInterpreter<W>
{
    fn program(&self) -> &Program
    {
        &self.program
    }

    fn current_location(&self) -> Option<SourceLocation>
    {
        self.program.token(self.index).map(|token| token.location().clone())
    }

    fn output(&mut self) -> &mut dyn Write
    {
        &mut self.output
    }
}


impl<W: Write> DeqInterpreter<W>
{
    /// Create an interpreter for the program with all of the built-in words registered.
    pub fn new(program: Program, config: Config, output: W) -> DeqInterpreter<W>
    {
        let mut interpreter = DeqInterpreter
            {
                program: Rc::new(program),
                config,
                dictionary: Dictionary::new(),
                deq: Deq::new(),
                call_stack: CallStack::new(),
                inverted: false,
                index: 0,
                literal: Direction::Right,
                flow: Flow::Advance,
                steps: 0,
                output
            };

        register_base_words(&mut interpreter);
        interpreter
    }

    /// Execute the program from its first token until it runs off the end, exits, or fails.
    /// Output is flushed whenever the run ends without an error.
    pub fn run(&mut self) -> error::Result<Outcome>
    {
        let program = Rc::clone(&self.program);

        while let Some(token) = program.token(self.index)
        {
            self.count_step()?;

            self.flow = Flow::Advance;
            self.literal = Direction::Right;

            trace!("{:?}", token);

            let executed = match decode(token.text())
                {
                    Ok(Instruction::Label) => false,

                    // No state dump after a bare trace.
                    Ok(Instruction::Keyword(word)) =>
                        {
                            self.execute_word(word)?;
                            word != "trace"
                        },

                    Ok(Instruction::Operation { direction, word }) =>
                        {
                            self.literal = direction;
                            self.execute_operation(word)?;
                            true
                        },

                    Err(message) => return script_error_str(self, ErrorKind::Structural, message)
                };

            if executed && self.config.debug
            {
                self.write_debug_state()?;
            }

            match self.flow
            {
                Flow::Advance => self.index += 1,
                Flow::Jump(target) => self.index = target,
                Flow::Exit =>
                    {
                        self.output.flush()?;
                        return Ok(Outcome::Exited);
                    }
            }
        }

        self.output.flush()?;
        Ok(Outcome::Completed)
    }

    /// Number of tokens dispatched so far.
    pub fn steps(&self) -> u64
    {
        self.steps
    }

    /// Give up the interpreter and hand back its output.
    pub fn into_output(self) -> W
    {
        self.output
    }

    /// Push a literal, run an operation word, or push the address of a label, in that order of
    /// preference.
    fn execute_operation(&mut self, word: &str) -> error::Result<()>
    {
        if let Some(literal) = parse_literal(word)
        {
            return match literal
                {
                    Ok(data) =>
                        {
                            self.push(data);
                            Ok(())
                        },

                    Err(message) => script_error_str(self, ErrorKind::Structural, message)
                };
        }

        if self.dictionary.find(word).is_some()
        {
            return self.execute_word(word);
        }

        if let Some(index) = self.program.labels().find(word)
        {
            self.push(Data::Integer(index as i64));
            return Ok(());
        }

        script_error_str(self, ErrorKind::UnknownOperation, "unexpected token")
    }

    /// Run a word from the dictionary.
    fn execute_word(&mut self, word: &str) -> error::Result<()>
    {
        let handler = match self.dictionary.find(word)
            {
                Some(info) => info.handler(),
                None => return script_error(self,
                                            ErrorKind::UnknownOperation,
                                            format!("unknown word '{}'", word))
            };

        (*handler)(self)
    }

    fn count_step(&mut self) -> error::Result<()>
    {
        self.steps += 1;

        if let Some(limit) = self.config.step_limit
            && self.steps > limit
        {
            return script_error(self,
                                ErrorKind::StepLimit,
                                format!("step limit of {} exceeded", limit));
        }

        Ok(())
    }

    fn underflow<T>(&self, count: usize) -> error::Result<T>
    {
        script_error(self,
                     ErrorKind::StackUnderflow,
                     format!("expected to have at least {} elements on the deq", count))
    }

    /// The debug mode dump written after every executed instruction.
    fn write_debug_state(&mut self) -> error::Result<()>
    {
        let returns: Vec<String> = self.call_stack
                                       .iter()
                                       .map(|frame| frame.return_index().to_string())
                                       .collect();

        writeln!(self.output, "DEQUE STATE:")?;
        writeln!(self.output, "{}", self.deq)?;
        writeln!(self.output, "CALL STACK: {}", returns.join(" "))?;

        Ok(())
    }
}
